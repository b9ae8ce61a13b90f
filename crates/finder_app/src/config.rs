use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use finder_engine::{ConverterSettings, SourceSettings};
use finder_logging::finder_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LogDestination;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "job_finder.ron";
/// Environment variable holding the currency service key.
pub const API_KEY_VAR: &str = "API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse config {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub vacancies_file: String,
    pub favorites_file: String,
    /// Pages fetched per search.
    pub pages: u32,
    pub top_n: usize,
    pub source_url: String,
    pub per_page: u32,
    pub area: String,
    pub converter_url: String,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let source = SourceSettings::default();
        let converter = ConverterSettings::default();
        Self {
            data_dir: PathBuf::from("data"),
            vacancies_file: "vacancies.json".to_string(),
            favorites_file: "likes_vacancy.json".to_string(),
            pages: 5,
            top_n: finder_core::DEFAULT_TOP_N,
            source_url: source.base_url,
            per_page: source.per_page,
            area: source.area,
            converter_url: converter.base_url,
            log_destination: LogDestination::File,
            log_file: PathBuf::from("job_finder.log"),
        }
    }
}

impl AppConfig {
    /// Loads `explicit`, or [`DEFAULT_CONFIG_FILE`] when present.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound && explicit.is_none() => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = Self::from_ron(&text).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        finder_info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_ron(text: &str) -> Result<Self, String> {
        ron::from_str(text).map_err(|err| err.to_string())
    }

    pub fn vacancies_path(&self) -> PathBuf {
        self.data_dir.join(&self.vacancies_file)
    }

    pub fn favorites_path(&self) -> PathBuf {
        self.data_dir.join(&self.favorites_file)
    }

    pub fn source_settings(&self) -> SourceSettings {
        SourceSettings {
            base_url: self.source_url.clone(),
            per_page: self.per_page,
            area: self.area.clone(),
            ..SourceSettings::default()
        }
    }

    pub fn converter_settings(&self, api_key: Option<String>) -> ConverterSettings {
        ConverterSettings {
            base_url: self.converter_url.clone(),
            api_key,
            ..ConverterSettings::default()
        }
    }
}

/// Reads the currency service key, loading `.env` first when one exists.
pub fn api_key_from_env() -> Option<String> {
    if let Ok(path) = dotenvy::dotenv() {
        finder_info!("Loaded environment from {:?}", path);
    }
    std::env::var(API_KEY_VAR)
        .ok()
        .filter(|key| !key.trim().is_empty())
}
