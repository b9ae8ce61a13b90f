//! Interactive console menu.
//!
//! Browsing runs through the pure `finder_core::update` state machine; this
//! module only turns keystrokes into messages and carries out the effects.
use std::io::{BufRead, Write};

use finder_core::{top_n, update, BrowseState, Effect, Msg, RawVacancy};
use finder_logging::{finder_info, finder_warn};

use crate::render;
use crate::services::Services;

const MAIN_MENU: &str = "\
1 - Search vacancies
2 - Top vacancies by salary
3 - Browse saved vacancies
4 - Browse favorites
5 - Clear saved vacancies
6 - Delete saved vacancies by field
7 - Exit";

const BROWSE_PROMPT: &str = "1 - add to favorites, 2 - next, 3 - back to menu";

pub struct Menu<'a, R, W> {
    input: R,
    output: W,
    services: &'a Services,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(input: R, output: W, services: &'a Services) -> Self {
        Self {
            input,
            output,
            services,
        }
    }

    /// Runs until the user exits or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "Welcome to job finder!")?;
        loop {
            writeln!(self.output, "\n{MAIN_MENU}")?;
            let Some(choice) = self.prompt("Choose an option:")? else {
                break;
            };
            match choice.as_str() {
                "1" => self.search()?,
                "2" => self.top()?,
                "3" => {
                    let items = self.load(true)?;
                    self.browse(items)?;
                }
                "4" => {
                    let items = self.load(false)?;
                    self.browse(items)?;
                }
                "5" => {
                    self.services.vacancies.clear()?;
                    writeln!(self.output, "Saved vacancies cleared.")?;
                }
                "6" => self.delete()?,
                "7" => break,
                other => writeln!(self.output, "Unknown option {other:?}.")?,
            }
        }
        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, text: &str) -> std::io::Result<Option<String>> {
        writeln!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_count(&mut self, text: &str) -> std::io::Result<Option<usize>> {
        loop {
            let Some(answer) = self.prompt(text)? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(count) if count > 0 => return Ok(Some(count)),
                _ => writeln!(self.output, "Please enter a positive number.")?,
            }
        }
    }

    fn load(&mut self, saved: bool) -> std::io::Result<Vec<RawVacancy>> {
        let store = if saved {
            &self.services.vacancies
        } else {
            &self.services.favorites
        };
        let (items, note) = render::listing(store.list());
        if let Some(note) = note {
            writeln!(self.output, "{note}")?;
        }
        Ok(items)
    }

    fn fetch(&mut self, query: &str) -> std::io::Result<Option<Vec<RawVacancy>>> {
        match self.services.fetch(query, self.services.pages) {
            Ok(found) => {
                writeln!(self.output, "Found {} vacancies.", found.len())?;
                Ok(Some(found))
            }
            Err(err) => {
                finder_warn!("Search for {:?} failed: {}", query, err);
                writeln!(self.output, "Search failed: {err}")?;
                Ok(None)
            }
        }
    }

    fn search(&mut self) -> anyhow::Result<()> {
        let Some(query) = self.prompt("Enter a search query:")? else {
            return Ok(());
        };
        let Some(found) = self.fetch(&query)? else {
            return Ok(());
        };
        if found.is_empty() {
            return Ok(());
        }
        self.browse(found.clone())?;
        let Some(answer) = self.prompt("Save all found vacancies? (y/n)")? else {
            return Ok(());
        };
        if matches!(answer.to_lowercase().as_str(), "y" | "yes") {
            let summary = self.services.vacancies.append(&found)?;
            writeln!(self.output, "{}", render::append_summary(&summary))?;
        }
        Ok(())
    }

    fn top(&mut self) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "1 - Rank saved vacancies\n2 - Rank a new search\n3 - Back"
        )?;
        let Some(choice) = self.prompt("Choose an option:")? else {
            return Ok(());
        };
        let (raw, count) = match choice.as_str() {
            "1" => (self.load(true)?, self.services.top_n),
            "2" => {
                let Some(count) = self.prompt_count("How many vacancies to show?")? else {
                    return Ok(());
                };
                let Some(query) = self.prompt("Enter a search query:")? else {
                    return Ok(());
                };
                match self.fetch(&query)? {
                    Some(found) => (found, count),
                    None => return Ok(()),
                }
            }
            _ => return Ok(()),
        };
        match top_n(&raw, count, self.services.converter.as_ref()) {
            Ok(best) => writeln!(self.output, "{}", render::ranking(&best))?,
            Err(err) => {
                finder_warn!("Ranking failed: {}", err);
                writeln!(self.output, "Cannot rank vacancies: {err}")?;
            }
        }
        Ok(())
    }

    fn delete(&mut self) -> anyhow::Result<()> {
        let Some(key) = self.prompt("Field to match (e.g. name, area, salary):")? else {
            return Ok(());
        };
        let Some(value) = self.prompt("Value it should contain:")? else {
            return Ok(());
        };
        let outcome = self.services.vacancies.delete(Some(&key), Some(&value));
        writeln!(self.output, "{}", render::delete_outcome(&outcome))?;
        Ok(())
    }

    fn browse(&mut self, items: Vec<RawVacancy>) -> anyhow::Result<()> {
        let mut state = BrowseState::new(items);
        while !state.is_finished() {
            let view = state.view();
            writeln!(self.output, "\n{}", render::browse_header(&view))?;
            if let Some(current) = &view.current {
                writeln!(
                    self.output,
                    "{}",
                    render::vacancy_card(current, self.services.converter.as_ref())
                )?;
            }
            let msg = match self.prompt(BROWSE_PROMPT)?.as_deref() {
                None | Some("3") => Msg::Quit,
                Some("1") => Msg::AddToFavorites,
                Some("2") => Msg::Skip,
                Some(_) => {
                    writeln!(self.output, "Please enter 1, 2 or 3.")?;
                    Msg::NoOp
                }
            };
            let (next, effects) = update(state, msg);
            state = next;
            self.apply(effects)?;
        }
        Ok(())
    }

    fn apply(&mut self, effects: Vec<Effect>) -> anyhow::Result<()> {
        for effect in effects {
            match effect {
                Effect::SaveVacancy(raw) => {
                    self.services.vacancies.append(std::slice::from_ref(&raw))?;
                }
                Effect::SaveFavorites(favorites) => {
                    if favorites.is_empty() {
                        continue;
                    }
                    let summary = self.services.favorites.append(&favorites)?;
                    finder_info!("Saved {} favorites", summary.added);
                    writeln!(self.output, "Favorites: {}", render::append_summary(&summary))?;
                }
            }
        }
        Ok(())
    }
}
