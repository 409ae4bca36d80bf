// Loki log store client
// ranged LogQL queries against /loki/api/v1/query_range

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use logrca_core::{LogEntry, LogQuery};
use reqwest::{header::ACCEPT, Client, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_LOKI_URL: &str = "http://localhost:3100";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid Loki URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Loki returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode Loki response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of log lines for a service.
///
/// Implementations degrade instead of failing: any problem reaching the store
/// shows up as an empty result.
#[async_trait]
pub trait LogSource: Send + Sync {
    async fn fetch_logs(
        &self,
        service: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Vec<LogEntry>;
}

#[derive(Debug, Clone)]
pub struct LokiClient {
    client: Client,
    base_url: String,
}

// {"data": {"result": [{"values": [[ts, line], ...]}, ...]}}
#[derive(Deserialize, Default)]
struct QueryRangeResponse {
    #[serde(default)]
    data: QueryData,
}

#[derive(Deserialize, Default)]
struct QueryData {
    #[serde(default)]
    result: Vec<Stream>,
}

#[derive(Deserialize)]
struct Stream {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

impl LokiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run one query_range request and return the log lines in store order
    pub async fn query_range(&self, query: &LogQuery) -> Result<Vec<LogEntry>, FetchError> {
        let url = self.query_url(query)?;

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let parsed: QueryRangeResponse = serde_json::from_slice(&body)?;
        let entries = extract_entries(parsed);

        debug!(service = %query.service, entries = entries.len(), "Loki query complete");
        Ok(entries)
    }

    fn query_url(&self, query: &LogQuery) -> Result<Url, FetchError> {
        let mut params = vec![
            ("query", stream_selector(&query.service)),
            ("limit", query.limit().to_string()),
        ];
        if let Some(start) = query.start {
            params.push(("start", to_nanos(start)));
        }
        if let Some(end) = query.end {
            params.push(("end", to_nanos(end)));
        }

        let endpoint = format!("{}/loki/api/v1/query_range", self.base_url);
        Url::parse_with_params(&endpoint, &params).map_err(|e| FetchError::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl LogSource for LokiClient {
    async fn fetch_logs(
        &self,
        service: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Vec<LogEntry> {
        let query = LogQuery::new(service).with_start(start).with_end(end);

        match self.query_range(&query).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(service, error = %e, "Error fetching logs from Loki");
                Vec::new()
            }
        }
    }
}

/// LogQL selector for streams labelled with the service
pub fn stream_selector(service: &str) -> String {
    let escaped = service.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{{service=\"{}\"}}", escaped)
}

/// Nanosecond epoch string, the timestamp format Loki expects
pub fn to_nanos(ts: DateTime<Utc>) -> String {
    let nanos = i128::from(ts.timestamp()) * 1_000_000_000 + i128::from(ts.timestamp_subsec_nanos());
    nanos.to_string()
}

// second element of each [timestamp, line] pair
fn extract_entries(response: QueryRangeResponse) -> Vec<LogEntry> {
    response
        .data
        .result
        .into_iter()
        .flat_map(|stream| stream.values)
        .filter_map(|value| value.get(1).and_then(|v| v.as_str()).map(str::to_string))
        .collect()
}
