//! EODHD provider implementation.
//!
//! This is the live data source. Every call is a single GET against the
//! EODHD REST API, authenticated with the `api_token` query parameter.
//!
//! # API Endpoints
//!
//! - Bulk last day: `{base}/eod-bulk-last-day/{exchange}?api_token=..&fmt=json&date={date}`
//! - History: `{base}/eod/{ticker}.{exchange}?api_token=..&fmt=json&from=..&to=..&order=a|d`
//!
//! # Response Format
//!
//! Both endpoints return a JSON array of flat records. The records are passed
//! through unmodified; history rows keep whatever order the provider sends.
//! A bulk body that is not an array counts as no records. A history body is
//! returned as decoded, whatever its shape.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use urlencoding::encode;

use crate::errors::MarketDataError;
use crate::models::{HistoryQuery, Record, Symbol, TradeDate};
use crate::provider::EodDataSource;

/// Public EODHD API base
pub const DEFAULT_BASE_URL: &str = "https://eodhd.com/api";

const PROVIDER_ID: &str = "EODHD";

/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const BULK_RESOURCE: &str = "bulk last day data";
const HISTORY_RESOURCE: &str = "historical data";

/// EODHD provider for fetching end-of-day equity data.
///
/// The access token is optional at construction so a misconfigured process
/// still starts; each fetch then fails with [`MarketDataError::MissingApiToken`].
///
/// # Example
///
/// ```ignore
/// let provider = EodhdProvider::new(Some("your-api-token".to_string()));
/// let rows = provider.fetch_bulk_snapshot("SHG", &"20230821".parse()?).await?;
/// ```
pub struct EodhdProvider {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl EodhdProvider {
    /// Create a provider against the public API with the default timeout.
    pub fn new(api_token: Option<String>) -> Self {
        Self::with_options(DEFAULT_BASE_URL, api_token, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a provider with an explicit base URL and request timeout.
    pub fn with_options(
        base_url: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token,
        }
    }

    fn api_token(&self) -> Result<&str, MarketDataError> {
        self.api_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or(MarketDataError::MissingApiToken)
    }

    /// Issue a GET and decode the body as JSON.
    ///
    /// Transport errors are stripped of their URL so the access token in the
    /// query string never reaches an error message.
    async fn fetch(
        &self,
        resource: &'static str,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, MarketDataError> {
        let token = self.api_token()?;
        let url = format!("{}{}", self.base_url, path);
        debug!("{} request: {}", PROVIDER_ID, path);

        let response = self
            .client
            .get(&url)
            .query(&[("api_token", token), ("fmt", "json")])
            .query(params)
            .send()
            .await
            .map_err(|e| MarketDataError::Network(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} {} returned {}", PROVIDER_ID, path, status);
            return Err(MarketDataError::UpstreamStatus { resource, status });
        }

        let body = response
            .text()
            .await
            .map_err(|e| MarketDataError::Network(e.without_url()))?;
        serde_json::from_str(&body).map_err(|e| MarketDataError::Decode {
            resource,
            message: e.to_string(),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl EodDataSource for EodhdProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_bulk_snapshot(
        &self,
        exchange: &str,
        date: &TradeDate,
    ) -> Result<Vec<Record>, MarketDataError> {
        let path = format!("/eod-bulk-last-day/{}", encode(exchange));
        let body = self
            .fetch(BULK_RESOURCE, &path, &[("date", date.iso())])
            .await?;

        // Only array bodies contribute snapshot items.
        match body {
            Value::Array(records) => Ok(records),
            other => {
                warn!(
                    "{} {} returned a non-array body ({}); treating as empty",
                    PROVIDER_ID,
                    path,
                    json_kind(&other)
                );
                Ok(Vec::new())
            }
        }
    }

    async fn fetch_history(
        &self,
        symbol: &Symbol,
        query: &HistoryQuery,
    ) -> Result<Record, MarketDataError> {
        let path = format!(
            "/eod/{}.{}",
            encode(symbol.ticker()),
            encode(symbol.exchange())
        );

        let mut params: Vec<(&str, &str)> = Vec::with_capacity(3);
        if let Some(from) = &query.from {
            params.push(("from", from.iso()));
        }
        if let Some(to) = &query.to {
            params.push(("to", to.iso()));
        }
        params.push(("order", query.order.as_param()));

        self.fetch(HISTORY_RESOURCE, &path, &params).await
    }
}
