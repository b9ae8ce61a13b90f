use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::AppConfig;

/// Search vacancies, rank them by salary and keep the interesting ones.
///
/// Without a subcommand an interactive menu starts.
#[derive(Parser, Debug)]
#[command(name = "job_finder", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// RON configuration file (default: ./job_finder.ron when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the vacancy and favorites files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch vacancies matching a query and print them
    Search {
        query: String,
        /// Number of result pages to fetch
        #[arg(long)]
        pages: Option<u32>,
        /// Append the results to the vacancy store
        #[arg(long)]
        save: bool,
    },
    /// Print the best-paid vacancies
    Top {
        /// How many to print
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Rank a fresh search instead of the stored vacancies
        #[arg(long)]
        query: Option<String>,
    },
    /// Print the stored vacancies
    List,
    /// Print the favorite vacancies
    Favorites,
    /// Remove every stored vacancy
    Clear,
    /// Remove stored vacancies whose field contains a value (case-insensitive)
    Delete {
        #[arg(long)]
        key: String,
        #[arg(long)]
        value: String,
    },
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
    }
}
