//! Settings for the EDGAR HTTP client.

use crate::model::ARCHIVES_BASE_URL;
use std::time::Duration;

/// Ticker mapping endpoint (hosted at www.sec.gov, not data.sec.gov)
pub const TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// Submissions API base URL
pub const SUBMISSIONS_BASE_URL: &str = "https://data.sec.gov/submissions";

/// Default rate limit: 10 requests per second (SEC requirement)
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent when none is configured.
///
/// SEC asks automated clients to identify themselves with a contact address.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "secfetch/",
    env!("CARGO_PKG_VERSION"),
    " (contact@example.com)"
);

/// Configuration for [`super::EdgarClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// URL of `company_tickers.json`
    pub tickers_url: String,
    /// Base URL for `CIK##########.json` and page documents
    pub submissions_base_url: String,
    /// Base URL for filing documents
    pub archives_base_url: String,
    /// Minimum spacing between requests
    pub min_interval: Duration,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            tickers_url: TICKERS_URL.to_string(),
            submissions_base_url: SUBMISSIONS_BASE_URL.to_string(),
            archives_base_url: ARCHIVES_BASE_URL.to_string(),
            min_interval: DEFAULT_MIN_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Point every endpoint at `base`, keeping SEC's paths.
    ///
    /// Useful for mirrors and for tests against a local server.
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.tickers_url = format!("{}/files/company_tickers.json", base);
        self.submissions_base_url = format!("{}/submissions", base);
        self.archives_base_url = format!("{}/Archives/edgar/data", base);
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the minimum spacing between requests.
    pub const fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Set the per-request timeout.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_sec() {
        let config = ClientConfig::default();
        assert_eq!(config.tickers_url, TICKERS_URL);
        assert_eq!(config.submissions_base_url, SUBMISSIONS_BASE_URL);
        assert!(config.user_agent.starts_with("secfetch/"));
    }

    #[test]
    fn test_with_base_url() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(
            config.tickers_url,
            "http://127.0.0.1:8080/files/company_tickers.json"
        );
        assert_eq!(config.submissions_base_url, "http://127.0.0.1:8080/submissions");
        assert_eq!(
            config.archives_base_url,
            "http://127.0.0.1:8080/Archives/edgar/data"
        );
    }
}
