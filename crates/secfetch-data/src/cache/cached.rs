//! Ticker resolution memoized in a [`TickerCache`].

use super::sqlite::TickerCache;
use crate::edgar::{FilingColumns, PageRef, Submissions};
use crate::error::Result;
use crate::model::Company;
use crate::source::FilingSource;
use chrono::Duration;
use tracing::{debug, warn};

/// Default lifetime of a cached ticker mapping.
pub const DEFAULT_TTL_DAYS: i64 = 7;

/// Wraps a source so ticker lookups hit the cache first.
///
/// Only the ticker mapping is cached; submissions always come from the inner
/// source. Cache failures are logged and fall through to the inner source.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    cache: TickerCache,
    ttl: Duration,
}

impl<S: FilingSource> CachedSource<S> {
    /// Wrap `inner` with the default TTL.
    pub fn new(inner: S, cache: TickerCache) -> Self {
        Self {
            inner,
            cache,
            ttl: Duration::days(DEFAULT_TTL_DAYS),
        }
    }

    /// Set how long a cached mapping stays valid. Zero forces a refresh.
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// The underlying cache.
    pub const fn cache(&self) -> &TickerCache {
        &self.cache
    }

    /// The wrapped source.
    pub const fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: FilingSource> FilingSource for CachedSource<S> {
    async fn resolve(&self, ticker: &str) -> Result<Company> {
        match self.cache.get(ticker, Some(self.ttl)) {
            Ok(Some(company)) => {
                debug!(ticker = %company.ticker, cik = %company.cik, "ticker cache hit");
                return Ok(company);
            }
            Ok(None) => debug!(ticker, "ticker cache miss"),
            Err(e) => warn!(ticker, error = %e, "ticker cache read failed"),
        }

        let company = self.inner.resolve(ticker).await?;
        if let Err(e) = self.cache.put(&company) {
            warn!(ticker = %company.ticker, error = %e, "ticker cache write failed");
        }
        Ok(company)
    }

    async fn submissions(&self, company: &Company) -> Result<Submissions> {
        self.inner.submissions(company).await
    }

    async fn submission_page(&self, page: &PageRef) -> Result<FilingColumns> {
        self.inner.submission_page(page).await
    }

    fn archives_base(&self) -> &str {
        self.inner.archives_base()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edgar::CikLookup;
    use crate::error::DataError;
    use crate::local::LocalSource;

    fn source() -> LocalSource {
        let lookup = CikLookup::from_json(
            r#"{"0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."}}"#,
        )
        .unwrap();
        LocalSource::new(lookup, "/nonexistent")
    }

    #[tokio::test]
    async fn test_miss_populates_cache() {
        let cached = CachedSource::new(source(), TickerCache::in_memory().unwrap());

        let company = cached.resolve("aapl").await.unwrap();
        assert_eq!(company.cik.as_str(), "0000320193");
        assert_eq!(cached.cache().get("AAPL", None).unwrap(), Some(company));
    }

    #[tokio::test]
    async fn test_hit_skips_inner_source() {
        let cache = TickerCache::in_memory().unwrap();
        // Not in the inner mapping, so only the cache can answer.
        cache
            .put(&Company::new("ZZZZ", "42".parse().unwrap(), "Cached Only Corp"))
            .unwrap();

        let cached = CachedSource::new(source(), cache);
        let company = cached.resolve("zzzz").await.unwrap();
        assert_eq!(company.name, "Cached Only Corp");
    }

    #[tokio::test]
    async fn test_zero_ttl_goes_to_inner_source() {
        let cache = TickerCache::in_memory().unwrap();
        cache
            .put(&Company::new("ZZZZ", "42".parse().unwrap(), "Cached Only Corp"))
            .unwrap();

        let cached = CachedSource::new(source(), cache).with_ttl(Duration::zero());
        let result = cached.resolve("ZZZZ").await;
        assert!(matches!(result, Err(DataError::UnknownTicker(_))));
    }

    #[tokio::test]
    async fn test_blank_ticker_matches_inner_source() {
        let cached = CachedSource::new(source(), TickerCache::in_memory().unwrap());
        let result = cached.resolve("  ").await;
        assert!(matches!(result, Err(DataError::InvalidFilter(_))));
        assert!(matches!(
            cached.inner().resolve("  ").await,
            Err(DataError::InvalidFilter(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_ticker_not_cached() {
        let cached = CachedSource::new(source(), TickerCache::in_memory().unwrap());
        assert!(cached.resolve("NOPE").await.is_err());
        assert_eq!(cached.cache().stats().unwrap().cik_mappings, 0);
    }
}
