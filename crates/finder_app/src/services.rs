use std::sync::Arc;

use anyhow::Context;
use finder_core::{CurrencyConverter, RawVacancy};
use finder_engine::{
    BlockingConverter, FetchError, FixerClient, HhSource, JsonFileStore, ListingSource,
    RecordStore,
};
use tokio::runtime::Runtime;

use crate::config::AppConfig;

/// Everything the menu and the subcommands talk to.
pub struct Services {
    pub(crate) runtime: Arc<Runtime>,
    pub(crate) source: Box<dyn ListingSource>,
    pub(crate) converter: Box<dyn CurrencyConverter>,
    pub(crate) vacancies: Box<dyn RecordStore>,
    pub(crate) favorites: Box<dyn RecordStore>,
    pub(crate) pages: u32,
    pub(crate) top_n: usize,
}

impl Services {
    pub fn from_config(config: &AppConfig, api_key: Option<String>) -> anyhow::Result<Self> {
        let runtime = Arc::new(Runtime::new().context("failed to start async runtime")?);
        let source = HhSource::new(config.source_settings()).context("invalid listing source")?;
        let client = FixerClient::new(config.converter_settings(api_key))
            .context("invalid currency converter")?;
        Ok(Self {
            converter: Box::new(BlockingConverter::new(client, runtime.clone())),
            runtime,
            source: Box::new(source),
            vacancies: Box::new(JsonFileStore::new(config.vacancies_path())),
            favorites: Box::new(JsonFileStore::new(config.favorites_path())),
            pages: config.pages,
            top_n: config.top_n,
        })
    }

    pub fn fetch(&self, query: &str, pages: u32) -> Result<Vec<RawVacancy>, FetchError> {
        self.runtime.block_on(self.source.fetch(query, pages))
    }
}
