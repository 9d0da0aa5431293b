//! Ticker to CIK mapping from SEC's `company_tickers.json`.

use crate::error::{DataError, Result};
use crate::model::{Cik, Company, normalize_ticker};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Lookup table for converting ticker symbols to companies.
///
/// CIK (Central Index Key) is a unique identifier assigned by the SEC to
/// companies filing with EDGAR.
#[derive(Debug, Clone, Default)]
pub struct CikLookup {
    by_ticker: HashMap<String, Company>,
}

/// Raw company ticker data from SEC JSON.
///
/// The SEC returns: `{"0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."}, ...}`
#[derive(Debug, Deserialize)]
struct CompanyTicker {
    /// CIK as a number (SEC returns this as an integer despite the name)
    cik_str: u64,
    ticker: String,
    title: String,
}

impl CikLookup {
    /// Parse the body of `company_tickers.json`.
    ///
    /// When a ticker appears more than once the entry with the lowest index
    /// wins.
    pub fn from_json(body: &str) -> Result<Self> {
        let data: BTreeMap<u32, CompanyTicker> = serde_json::from_str(body)
            .map_err(|e| DataError::Parse(format!("Failed to parse company tickers: {}", e)))?;
        Ok(Self::from_entries(data.into_values()))
    }

    fn from_entries(entries: impl IntoIterator<Item = CompanyTicker>) -> Self {
        let mut by_ticker = HashMap::new();
        for entry in entries {
            let ticker = normalize_ticker(&entry.ticker);
            if ticker.is_empty() {
                continue;
            }
            let Ok(cik) = Cik::from_number(entry.cik_str) else {
                debug!(ticker = %ticker, cik = entry.cik_str, "skipping ticker with invalid CIK");
                continue;
            };
            by_ticker
                .entry(ticker.clone())
                .or_insert_with(|| Company::new(&ticker, cik, entry.title));
        }
        Self { by_ticker }
    }

    /// Look up a company by ticker symbol (case-insensitive).
    pub fn get(&self, ticker: &str) -> Option<&Company> {
        self.by_ticker.get(&normalize_ticker(ticker))
    }

    /// Resolve a ticker, failing with `DataError::UnknownTicker` when absent.
    ///
    /// A blank ticker is `DataError::InvalidFilter`.
    pub fn resolve(&self, ticker: &str) -> Result<Company> {
        if ticker.trim().is_empty() {
            return Err(DataError::InvalidFilter("ticker cannot be empty".to_string()));
        }
        self.get(ticker)
            .cloned()
            .ok_or_else(|| DataError::UnknownTicker(normalize_ticker(ticker)))
    }

    /// Number of tickers in the table.
    pub fn len(&self) -> usize {
        self.by_ticker.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.by_ticker.is_empty()
    }
}
