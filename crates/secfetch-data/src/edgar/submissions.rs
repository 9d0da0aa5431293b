//! Company submissions documents from the EDGAR submissions API.
//!
//! The SEC publishes filing history as parallel arrays where each index
//! corresponds to a single filing. The newest filings live in
//! `filings.recent`; older history is split into separate page documents
//! listed in `filings.files`.

use crate::model::FeedEntry;
use chrono::NaiveDate;
use serde::Deserialize;

/// Company submissions document (`CIK##########.json`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submissions {
    /// Company name as registered with the SEC
    #[serde(default)]
    pub name: String,
    /// Tickers the company trades under
    #[serde(default)]
    pub tickers: Vec<String>,
    /// Filing history
    #[serde(default)]
    pub filings: FilingHistory,
}

/// Container for filing history data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilingHistory {
    /// Most recent filings, newest first
    #[serde(default)]
    pub recent: FilingColumns,
    /// Older history pages
    #[serde(default)]
    pub files: Vec<PageRef>,
}

/// Columnar filing data, shared by `recent` and older pages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingColumns {
    /// Accession numbers (unique filing identifiers)
    #[serde(default)]
    pub accession_number: Vec<String>,
    /// Filing dates in YYYY-MM-DD format
    #[serde(default)]
    pub filing_date: Vec<String>,
    /// Form types (e.g., "10-K", "10-Q", "8-K")
    #[serde(default)]
    pub form: Vec<String>,
    /// Primary document filenames
    #[serde(default)]
    pub primary_document: Vec<String>,
}

impl FilingColumns {
    /// Number of complete rows.
    ///
    /// Required columns of unequal length are truncated to the shortest.
    pub fn len(&self) -> usize {
        self.accession_number
            .len()
            .min(self.filing_date.len())
            .min(self.form.len())
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate rows in feed order.
    ///
    /// A missing primary document yields an empty string.
    pub fn entries(&self) -> impl Iterator<Item = FeedEntry<'_>> + '_ {
        (0..self.len()).map(move |i| FeedEntry {
            accession_number: &self.accession_number[i],
            form: &self.form[i],
            filing_date: &self.filing_date[i],
            primary_document: self.primary_document.get(i).map_or("", String::as_str),
        })
    }
}

/// Descriptor of an older submissions page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRef {
    /// File name, e.g. `CIK0000320193-submissions-001.json`
    pub name: String,
    /// Number of filings in the page
    #[serde(default)]
    pub filing_count: u64,
    /// Earliest filing date in the page
    pub filing_from: NaiveDate,
    /// Latest filing date in the page
    pub filing_to: NaiveDate,
}
