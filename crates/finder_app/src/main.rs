mod cli;
mod commands;
mod config;
mod logging;
mod menu;
mod render;
mod services;

use std::io;

use anyhow::Context;
use clap::Parser;
use finder_logging::{finder_info, level_from_verbosity};
use log::LevelFilter;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::menu::Menu;
use crate::services::Services;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_overrides(&mut config);

    logging::initialize(
        config.log_destination,
        &config.log_file,
        level_from_verbosity(LevelFilter::Info, cli.verbose),
    );
    finder_info!("job_finder starting, data dir {:?}", config.data_dir);

    let services = Services::from_config(&config, config::api_key_from_env())?;

    match cli.command {
        Some(command) => commands::run(command, &services, &mut io::stdout().lock()),
        None => Menu::new(io::stdin().lock(), io::stdout().lock(), &services).run(),
    }
}
