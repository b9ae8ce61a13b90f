use finder_core::RawVacancy;
use finder_logging::{finder_debug, finder_info};
use serde::Deserialize;
use serde_json::Value;

use crate::fetch::{build_client, build_url, read_json, HttpSettings};
use crate::{FailureKind, FetchError};

/// Contact shown when a posting names no department.
pub const NO_CONTACT: &str = "Not specified.";

/// Remote service returning vacancies for a free-text query.
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches up to `page_count` result pages for `query`.
    async fn fetch(&self, query: &str, page_count: u32) -> Result<Vec<RawVacancy>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub base_url: String,
    pub per_page: u32,
    /// Region code; 113 is "Russia".
    pub area: String,
    pub http: HttpSettings,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.hh.ru/vacancies".to_string(),
            per_page: 100,
            area: "113".to_string(),
            http: HttpSettings::default(),
        }
    }
}

/// Listing source backed by the hh.ru vacancies API.
#[derive(Debug, Clone)]
pub struct HhSource {
    settings: SourceSettings,
    client: reqwest::Client,
}

impl HhSource {
    pub fn new(settings: SourceSettings) -> Result<Self, FetchError> {
        let client = build_client(&settings.http)?;
        Ok(Self { settings, client })
    }

    fn page_url(&self, query: &str, page: u32) -> Result<reqwest::Url, FetchError> {
        build_url(
            &self.settings.base_url,
            &[
                ("text", query.to_string()),
                ("page", page.to_string()),
                ("per_page", self.settings.per_page.to_string()),
                ("area", self.settings.area.clone()),
            ],
        )
    }
}

#[async_trait::async_trait]
impl ListingSource for HhSource {
    async fn fetch(&self, query: &str, page_count: u32) -> Result<Vec<RawVacancy>, FetchError> {
        let mut vacancies = Vec::new();

        for page in 0..page_count {
            let url = self.page_url(query, page)?;
            let body = read_json(self.client.get(url), &self.settings.http).await?;

            let items = body.get("items").and_then(Value::as_array).ok_or_else(|| {
                FetchError::new(
                    FailureKind::MissingField("items".to_string()),
                    "response carries no `items` array",
                )
            })?;
            for item in items {
                vacancies.push(HhItem::parse(item)?.into_raw());
            }
            finder_debug!("Fetched page {} for {:?}: {} items", page, query, items.len());

            // The API reports how many pages exist; stop once past the last one.
            let available = body.get("pages").and_then(Value::as_u64);
            if available.is_some_and(|pages| u64::from(page) + 1 >= pages) {
                break;
            }
        }

        finder_info!("Fetched {} vacancies for {:?}", vacancies.len(), query);
        Ok(vacancies)
    }
}

#[derive(Debug, Deserialize)]
struct HhItem {
    name: String,
    alternate_url: String,
    #[serde(default)]
    salary: Value,
    #[serde(default)]
    snippet: Option<HhSnippet>,
    #[serde(default)]
    area: Option<HhNamed>,
    #[serde(default)]
    department: Option<HhNamed>,
}

#[derive(Debug, Deserialize)]
struct HhSnippet {
    #[serde(default)]
    requirement: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HhNamed {
    #[serde(default)]
    name: Option<String>,
}

impl HhItem {
    fn parse(item: &Value) -> Result<Self, FetchError> {
        Self::deserialize(item)
            .map_err(|err| FetchError::new(FailureKind::MalformedJson, format!("vacancy item: {err}")))
    }

    fn into_raw(self) -> RawVacancy {
        let description = self
            .snippet
            .and_then(|snippet| snippet.requirement)
            .map_or(Value::Null, Value::String);
        let area = self
            .area
            .and_then(|area| area.name)
            .map_or(Value::Null, Value::String);
        let contact = self
            .department
            .and_then(|department| department.name)
            .unwrap_or_else(|| NO_CONTACT.to_string());

        let mut raw = RawVacancy::new();
        raw.insert("name".into(), Value::String(self.name));
        raw.insert("link".into(), Value::String(self.alternate_url));
        raw.insert("salary".into(), self.salary);
        raw.insert("description".into(), description);
        raw.insert("area".into(), area);
        raw.insert("contact".into(), Value::String(contact));
        raw
    }
}
