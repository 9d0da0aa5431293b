//! SEC EDGAR data fetching and parsing.
//!
//! This module provides access to SEC EDGAR filings including:
//! - Company CIK lookup from ticker symbols
//! - Submissions documents with recent and paged filing history
//! - A rate-limited HTTP client honoring SEC's fair-access policy
//!
//! # Example
//!
//! ```no_run
//! use secfetch_data::edgar::EdgarClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new()?;
//!     let company = client.get_company("AAPL").await?;
//!     let submissions = client.get_submissions(&company).await?;
//!     println!("Found {} recent filings", submissions.filings.recent.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod submissions;
pub mod tickers;

// Re-export main types
pub use client::EdgarClient;
pub use config::ClientConfig;
pub use submissions::{FilingColumns, FilingHistory, PageRef, Submissions};
pub use tickers::CikLookup;
