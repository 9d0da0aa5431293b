#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/secfetch/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export main types from sub-crates
pub use secfetch_data as data;
pub use secfetch_output as output;

pub use secfetch_data::{
    Cik, Company, DataError, EdgarClient, FilingQuery, FilingRecord, OutputMode, QueryFilter,
    QueryResult,
};
pub use secfetch_output::FilingReport;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
