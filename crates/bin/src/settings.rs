//! Resolved runtime settings for one invocation.

use crate::cache_manager;
use crate::cli::Cli;
use chrono::Duration;
use secfetch_data::ClientConfig;
use secfetch_data::cache::DEFAULT_TTL_DAYS;
use std::path::PathBuf;

/// Where filings are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceKind {
    /// SEC over HTTP.
    Edgar,
    /// SEC-format files on disk.
    Local {
        /// `company_tickers.json`
        tickers_file: PathBuf,
        /// Directory of `CIK##########.json` files
        submissions_dir: PathBuf,
    },
}

/// Configuration for the ticker mapping cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FetchConfig {
    /// Whether to use the cache.
    pub(crate) use_cache: bool,
    /// Whether to force refresh (ignore cached entries, still write new ones).
    pub(crate) force_refresh: bool,
    /// Cache database location.
    pub(crate) cache_path: PathBuf,
}

impl FetchConfig {
    /// How long cached mappings stay valid under this configuration.
    pub(crate) fn ttl(&self) -> Duration {
        if self.force_refresh {
            Duration::zero()
        } else {
            Duration::days(DEFAULT_TTL_DAYS)
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            force_refresh: false,
            cache_path: cache_manager::default_cache_path(),
        }
    }
}

/// Everything `run` needs besides the query filter.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) client: ClientConfig,
    pub(crate) fetch: FetchConfig,
    pub(crate) source: SourceKind,
    pub(crate) max_pages: usize,
}

impl Settings {
    pub(crate) fn from_cli(cli: &Cli) -> Self {
        let mut client = ClientConfig::default();
        if let Some(user_agent) = cli.user_agent.as_deref().map(str::trim)
            && !user_agent.is_empty()
        {
            client = client.with_user_agent(user_agent);
        }

        let fetch = FetchConfig {
            use_cache: !cli.no_cache,
            force_refresh: cli.refresh,
            cache_path: cli
                .cache_path
                .clone()
                .unwrap_or_else(cache_manager::default_cache_path),
        };

        let source = match (&cli.tickers_file, &cli.submissions_dir) {
            (Some(tickers_file), Some(submissions_dir)) => SourceKind::Local {
                tickers_file: tickers_file.clone(),
                submissions_dir: submissions_dir.clone(),
            },
            _ => SourceKind::Edgar,
        };

        Self {
            client,
            fetch,
            source,
            max_pages: cli.max_pages,
        }
    }
}
