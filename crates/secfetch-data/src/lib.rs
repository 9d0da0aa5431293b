#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/secfetch/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod edgar;
pub mod error;
pub mod filter;
pub mod local;
pub mod model;
pub mod query;
pub mod source;

pub use cache::{CachedSource, TickerCache};
pub use edgar::{ClientConfig, EdgarClient};
pub use error::{DataError, Result};
pub use filter::{OutputMode, QueryFilter, QueryFilterBuilder};
pub use local::LocalSource;
pub use model::{Cik, Company, FilingRecord};
pub use query::{FilingQuery, QueryResult};
pub use source::FilingSource;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
