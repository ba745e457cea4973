use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::data::models::{RawSalesRecord, SalesRecord};
use crate::domain::{Region, YearFilter};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("Sales payload is not a JSON array of sales records: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("Purchase date {value:?} of record {index} is not dd/mm/yyyy: {source}")]
    InvalidDate {
        index: usize,
        value: String,
        source: chrono::ParseError,
    },
}

/// Anything that can hand the dashboard a fresh set of sales.
#[async_trait]
pub trait SalesSource: Send + Sync {
    async fn fetch_sales(
        &self,
        region: Region,
        year: YearFilter,
    ) -> Result<Vec<SalesRecord>, FetchError>;
}

/// HTTP client for the sales endpoint
#[derive(Debug, Clone)]
pub struct SalesClient {
    client: Client,
    base_url: Url,
}

impl SalesClient {
    pub fn new(base_url: Url) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client, base_url })
    }

    /// Wraps an already configured reqwest client.
    pub const fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl SalesSource for SalesClient {
    async fn fetch_sales(
        &self,
        region: Region,
        year: YearFilter,
    ) -> Result<Vec<SalesRecord>, FetchError> {
        let url = self.base_url.to_string();
        tracing::debug!(%url, %region, %year, "Fetching sales");

        let response = self
            .client
            .get(self.base_url.clone())
            .query(&query_params(region, year))
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let records = parse_sales_payload(&body)?;
        tracing::info!(records = records.len(), %region, %year, "Fetched sales");
        Ok(records)
    }
}

/// Query string sent with every request: `regiao` and `ano`, both empty
/// when unfiltered.
pub fn query_params(region: Region, year: YearFilter) -> [(&'static str, String); 2] {
    [("regiao", region.query_value()), ("ano", year.query_value())]
}

/// Decodes the endpoint's JSON array into sales records.
pub fn parse_sales_payload(body: &str) -> Result<Vec<SalesRecord>, FetchError> {
    let raw: Vec<RawSalesRecord> = serde_json::from_str(body)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| record.into_record(index))
        .collect()
}
