//! SEC EDGAR API client with rate limiting.

use super::config::ClientConfig;
use super::submissions::{FilingColumns, PageRef, Submissions};
use super::tickers::CikLookup;
use crate::error::{DataError, Result};
use crate::model::Company;
use crate::source::FilingSource;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Rate limiter to ensure we don't exceed SEC's rate limits
#[derive(Debug)]
struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    const fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

/// SEC EDGAR API client with rate limiting.
///
/// The ticker mapping is downloaded at most once per client.
pub struct EdgarClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    tickers: OnceCell<CikLookup>,
    config: ClientConfig,
}

impl EdgarClient {
    /// Create a new EDGAR client with default settings (10 req/sec)
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new EDGAR client from explicit settings.
    ///
    /// # Example
    /// ```no_run
    /// use secfetch_data::edgar::{ClientConfig, EdgarClient};
    /// use std::time::Duration;
    ///
    /// # fn example() -> secfetch_data::Result<()> {
    /// // 5 requests per second
    /// let config = ClientConfig::default()
    ///     .with_user_agent("Example Research admin@example.org")
    ///     .with_min_interval(Duration::from_millis(200));
    /// let client = EdgarClient::with_config(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.min_interval))),
            tickers: OnceCell::new(),
            config,
        })
    }

    /// Settings this client was built with.
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The ticker mapping, fetched on first use.
    pub async fn ticker_lookup(&self) -> Result<&CikLookup> {
        self.tickers
            .get_or_try_init(|| async {
                let body = self.get_text(&self.config.tickers_url).await?;
                let lookup = CikLookup::from_json(&body).map_err(|e| {
                    DataError::ServiceUnavailable(format!("Malformed ticker mapping: {}", e))
                })?;
                debug!(tickers = lookup.len(), "loaded SEC ticker mapping");
                Ok::<_, DataError>(lookup)
            })
            .await
    }

    /// Look up a company from its ticker symbol
    ///
    /// # Errors
    /// Returns `DataError::UnknownTicker` if the ticker is not found, and
    /// `DataError::ServiceUnavailable` if the mapping cannot be downloaded.
    ///
    /// # Example
    /// ```no_run
    /// use secfetch_data::edgar::EdgarClient;
    ///
    /// # async fn example() -> secfetch_data::Result<()> {
    /// let client = EdgarClient::new()?;
    /// let company = client.get_company("AAPL").await?;
    /// println!("Apple CIK: {}", company.cik);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_company(&self, ticker: &str) -> Result<Company> {
        if ticker.trim().is_empty() {
            return Err(DataError::InvalidFilter("ticker cannot be empty".to_string()));
        }
        self.ticker_lookup().await?.resolve(ticker)
    }

    /// Get company submissions metadata including recent filings
    pub async fn get_submissions(&self, company: &Company) -> Result<Submissions> {
        let url = format!(
            "{}/CIK{}.json",
            self.config.submissions_base_url.trim_end_matches('/'),
            company.cik
        );
        self.get_json(&url).await
    }

    /// Get one older page of a company's filing history
    pub async fn get_submission_page(&self, page: &PageRef) -> Result<FilingColumns> {
        let url = format!(
            "{}/{}",
            self.config.submissions_base_url.trim_end_matches('/'),
            page.name
        );
        self.get_json(&url).await
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response> {
        self.rate_limiter.lock().await.wait().await;
        debug!(url, "GET");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::ServiceUnavailable(format!(
                "GET {} returned HTTP {}",
                url, status
            )));
        }
        Ok(response)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.send(url).await?;
        response
            .text()
            .await
            .map_err(|e| DataError::ServiceUnavailable(format!("Failed to read {}: {}", url, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(url).await?;
        response
            .json()
            .await
            .map_err(|e| DataError::ServiceUnavailable(format!("Failed to parse {}: {}", url, e)))
    }
}

impl FilingSource for EdgarClient {
    async fn resolve(&self, ticker: &str) -> Result<Company> {
        self.get_company(ticker).await
    }

    async fn submissions(&self, company: &Company) -> Result<Submissions> {
        self.get_submissions(company).await
    }

    async fn submission_page(&self, page: &PageRef) -> Result<FilingColumns> {
        self.get_submission_page(page).await
    }

    fn archives_base(&self) -> &str {
        &self.config.archives_base_url
    }
}

impl std::fmt::Debug for EdgarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgarClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_rate_limiter_spaces_requests() {
        let mut limiter = RateLimiter::new(Duration::from_millis(200));
        let start = Instant::now();

        limiter.wait().await;
        limiter.wait().await;
        limiter.wait().await;

        // 2 intervals between 3 requests
        assert!(start.elapsed() >= Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limiter_first_request_immediate() {
        let mut limiter = RateLimiter::new(Duration::from_secs(5));
        let start = Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_empty_ticker_rejected_without_request() {
        let client = EdgarClient::with_config(
            ClientConfig::default().with_base_url("http://127.0.0.1:9"),
        )
        .unwrap();
        let result = client.get_company("  ").await;
        assert!(matches!(result, Err(DataError::InvalidFilter(_))));
    }
}
