//! Non-interactive subcommands.
use std::io::Write;

use anyhow::Context;
use finder_core::top_n;
use finder_logging::finder_info;

use crate::cli::Command;
use crate::render;
use crate::services::Services;

pub fn run(command: Command, services: &Services, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Search { query, pages, save } => {
            let pages = pages.unwrap_or(services.pages);
            let found = services
                .fetch(&query, pages)
                .with_context(|| format!("search for {query:?} failed"))?;
            writeln!(out, "Found {} vacancies.", found.len())?;
            for raw in &found {
                writeln!(out, "{}", render::vacancy_card(raw, services.converter.as_ref()))?;
            }
            if save {
                let summary = services.vacancies.append(&found)?;
                writeln!(out, "{}", render::append_summary(&summary))?;
            }
        }
        Command::Top { count, query } => {
            let count = count.unwrap_or(services.top_n);
            let raw = match &query {
                Some(query) => services
                    .fetch(query, services.pages)
                    .with_context(|| format!("search for {query:?} failed"))?,
                None => {
                    let (raw, note) = render::listing(services.vacancies.list());
                    if let Some(note) = note {
                        writeln!(out, "{note}")?;
                    }
                    raw
                }
            };
            let best = top_n(&raw, count, services.converter.as_ref())
                .context("cannot rank vacancies")?;
            finder_info!("Ranked {} vacancies, showing {}", raw.len(), best.len());
            writeln!(out, "{}", render::ranking(&best))?;
        }
        Command::List => print_listing(services.vacancies.list(), services, out)?,
        Command::Favorites => print_listing(services.favorites.list(), services, out)?,
        Command::Clear => {
            services.vacancies.clear()?;
            writeln!(out, "Vacancy store cleared.")?;
        }
        Command::Delete { key, value } => {
            let outcome = services.vacancies.delete(Some(&key), Some(&value));
            writeln!(out, "{}", render::delete_outcome(&outcome))?;
        }
    }
    Ok(())
}

fn print_listing(
    outcome: finder_engine::LoadOutcome,
    services: &Services,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let (raw, note) = render::listing(outcome);
    if let Some(note) = note {
        writeln!(out, "{note}")?;
    }
    for vacancy in &raw {
        writeln!(out, "{}", render::vacancy_card(vacancy, services.converter.as_ref()))?;
    }
    Ok(())
}
