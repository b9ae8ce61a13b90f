use std::sync::Arc;

use finder_core::{ConversionError, CurrencyConverter, BASE_CURRENCY};
use finder_logging::finder_debug;
use serde_json::Value;
use tokio::runtime::Runtime;

use crate::fetch::{build_client, build_url, read_json, HttpSettings};
use crate::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct ConverterSettings {
    pub base_url: String,
    /// Sent as the `apikey` header; conversions fail fast without it.
    pub api_key: Option<String>,
    pub target_currency: String,
    pub http: HttpSettings,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.apilayer.com/fixer/convert".to_string(),
            api_key: None,
            target_currency: BASE_CURRENCY.to_string(),
            http: HttpSettings::default(),
        }
    }
}

/// Client for the Fixer `convert` endpoint.
#[derive(Debug, Clone)]
pub struct FixerClient {
    settings: ConverterSettings,
    client: reqwest::Client,
}

impl FixerClient {
    pub fn new(settings: ConverterSettings) -> Result<Self, FetchError> {
        let client = build_client(&settings.http)?;
        Ok(Self { settings, client })
    }

    /// Converts `amount` of `currency` into the target currency, truncating to whole units.
    pub async fn convert(&self, amount: u64, currency: &str) -> Result<u64, FetchError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                FetchError::new(
                    FailureKind::MissingApiKey,
                    "set API_KEY to convert foreign-currency salaries",
                )
            })?;

        let url = build_url(
            &self.settings.base_url,
            &[
                ("to", self.settings.target_currency.clone()),
                ("from", currency.to_string()),
                ("amount", amount.to_string()),
            ],
        )?;
        let body = read_json(self.client.get(url).header("apikey", api_key), &self.settings.http)
            .await?;

        let result = body.get("result").ok_or_else(|| {
            FetchError::new(
                FailureKind::MissingField("result".to_string()),
                describe_failure(&body)
                    .unwrap_or_else(|| "conversion response carries no `result`".to_string()),
            )
        })?;
        let converted = result
            .as_f64()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .map(|value| value.trunc() as u64)
            .ok_or_else(|| {
                FetchError::new(
                    FailureKind::MalformedJson,
                    format!("`result` is not a non-negative number: {result}"),
                )
            })?;

        finder_debug!(
            "Converted {} {} to {} {}",
            amount,
            currency,
            converted,
            self.settings.target_currency
        );
        Ok(converted)
    }
}

/// Synchronous `CurrencyConverter` over [`FixerClient`], driving each call on `runtime`.
///
/// Must not be called from inside an async context.
pub struct BlockingConverter {
    client: FixerClient,
    runtime: Arc<Runtime>,
}

impl BlockingConverter {
    pub fn new(client: FixerClient, runtime: Arc<Runtime>) -> Self {
        Self { client, runtime }
    }
}

impl CurrencyConverter for BlockingConverter {
    fn convert(&self, amount: u64, currency: &str) -> Result<u64, ConversionError> {
        self.runtime
            .block_on(self.client.convert(amount, currency))
            .map_err(|err| ConversionError::new(amount, currency, err.to_string()))
    }
}

/// Message of a Fixer `{"success": false, "error": {...}}` payload.
fn describe_failure(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    error
        .get("info")
        .or_else(|| error.get("type"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
