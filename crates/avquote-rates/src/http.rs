//! # HTTP Rate Provider
//!
//! Fetches a USD-based table from a public JSON endpoint shaped like
//!
//! ```json
//! { "base": "USD", "date": "2024-05-01", "rates": { "USD": 1, "INR": 83.12 } }
//! ```
//!
//! ## Request Flow
//! ```text
//! fetch_rates()
//!     │
//!     ├──► GET url (timeout) ──► 2xx ──► parse_rates_body() ──► RateTable
//!     │                           │
//!     │                           └─ 429/5xx/timeout ──► sleep, retry
//!     │                                                  (max_retries)
//!     └──► anything else ──► RatesError
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{RatesError, RatesResult};
use crate::provider::{RateProvider, RateTable};

/// Public endpoint used when nothing else is configured.
pub const DEFAULT_RATES_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";

const INITIAL_RETRY_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
struct RatesBody {
    #[serde(default)]
    base: Option<String>,
    rates: BTreeMap<String, Decimal>,
}

/// Parses a rate-service body. A missing `base` is taken to be USD.
pub fn parse_rates_body(body: &str) -> RatesResult<RateTable> {
    let parsed: RatesBody = serde_json::from_str(body)?;
    let base = parsed.base.as_deref().unwrap_or("USD");
    Ok(RateTable::new(base, parsed.rates))
}

/// Rate provider backed by an HTTP JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpRateProvider {
    client: Client,
    url: String,
    timeout_secs: u64,
    max_retries: u32,
}

impl HttpRateProvider {
    /// Creates a provider for `url` with a per-request timeout.
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> RatesResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("avquote/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RatesError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            timeout_secs,
            max_retries: 2,
        })
    }

    /// Sets how many times a retryable failure is retried.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_once(&self) -> RatesResult<RateTable> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RatesError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.map_reqwest_error(e))?;
        parse_rates_body(&body)
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> RatesError {
        if err.is_timeout() {
            RatesError::Timeout(self.timeout_secs)
        } else {
            RatesError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_rates(&self) -> RatesResult<RateTable> {
        let mut attempt = 0;
        let mut delay = INITIAL_RETRY_DELAY_MS;

        loop {
            match self.fetch_once().await {
                Ok(table) => {
                    debug!(url = %self.url, currencies = table.len(), "Fetched exchange rates");
                    return Ok(table);
                }
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        url = %self.url,
                        error = %err,
                        "Rate request failed, retrying ({}/{})",
                        attempt,
                        self.max_retries
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    delay *= 2;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
