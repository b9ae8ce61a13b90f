use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::USER_AGENT;
use serde_json::Value;

use crate::{FailureKind, FetchError};

/// Transport limits shared by the HTTP adapters.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
            user_agent: format!("job_finder/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

pub(crate) fn build_client(settings: &HttpSettings) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .build()
        .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
}

pub(crate) fn build_url(base: &str, params: &[(&str, String)]) -> Result<reqwest::Url, FetchError> {
    reqwest::Url::parse_with_params(base, params)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, format!("{base}: {err}")))
}

/// Sends `request` and parses the body as JSON, enforcing the size cap while streaming.
pub(crate) async fn read_json(
    request: reqwest::RequestBuilder,
    settings: &HttpSettings,
) -> Result<Value, FetchError> {
    let response = request
        .header(USER_AGENT, settings.user_agent.as_str())
        .send()
        .await
        .map_err(map_reqwest_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }

    if let Some(content_len) = response.content_length() {
        if content_len > settings.max_bytes {
            return Err(too_large(settings.max_bytes, content_len));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        let next_len = bytes.len() as u64 + chunk.len() as u64;
        if next_len > settings.max_bytes {
            return Err(too_large(settings.max_bytes, next_len));
        }
        bytes.extend_from_slice(&chunk);
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(FetchError::new(
            FailureKind::EmptyBody,
            "server returned an empty response",
        ));
    }

    serde_json::from_slice(&bytes)
        .map_err(|err| FetchError::new(FailureKind::MalformedJson, err.to_string()))
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
