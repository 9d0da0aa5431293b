//! Core records: issuer identifiers, companies and filings.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Base URL of the EDGAR document archive.
pub const ARCHIVES_BASE_URL: &str = "https://www.sec.gov/Archives/edgar/data";

/// Central Index Key, zero-padded to 10 digits.
///
/// # Example
/// ```
/// # use secfetch_data::Cik;
/// let cik: Cik = "320193".parse().unwrap();
/// assert_eq!(cik.as_str(), "0000320193");
/// assert_eq!(cik.unpadded(), "320193");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Into, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cik(String);

impl Cik {
    /// Width of a padded CIK.
    pub const WIDTH: usize = 10;

    /// Build a CIK from the integer form SEC uses in `company_tickers.json`.
    pub fn from_number(n: u64) -> Result<Self> {
        n.to_string().parse()
    }

    /// The padded 10-digit form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The form without leading zeros, as used in archive paths.
    pub fn unpadded(&self) -> &str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() { "0" } else { trimmed }
    }
}

impl FromStr for Cik {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.len() > Self::WIDTH || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DataError::InvalidCik(s.to_string()));
        }
        Ok(Self(format!("{:0>10}", s)))
    }
}

impl TryFrom<String> for Cik {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// A company resolved from its ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Upper-cased ticker symbol
    pub ticker: String,
    /// Central Index Key
    pub cik: Cik,
    /// Registered company name
    pub name: String,
}

impl Company {
    /// Create a company, normalizing the ticker.
    pub fn new(ticker: &str, cik: Cik, name: impl Into<String>) -> Self {
        Self {
            ticker: normalize_ticker(ticker),
            cik,
            name: name.into(),
        }
    }
}

/// One filing returned by EDGAR.
///
/// Serialized keys are exactly the field names below; `filing_date` is
/// rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRecord {
    /// Ticker the filing was requested under
    pub ticker: String,
    /// Filer CIK
    pub cik: Cik,
    /// Filer name
    pub company_name: String,
    /// Form type (e.g. "10-K"), upper-cased
    pub form_type: String,
    /// Date the filing was accepted
    pub filing_date: NaiveDate,
    /// Accession number (e.g. "0000320193-23-000106")
    pub accession_number: String,
    /// Link to the primary document, or the filing index when there is none
    pub document_url: String,
}

impl FilingRecord {
    /// Build a record for `company` from one feed entry.
    ///
    /// Returns `None` when the entry has a blank form type or an unparseable
    /// filing date; such entries are dropped from results.
    pub fn from_entry(company: &Company, entry: &FeedEntry<'_>, archives_base: &str) -> Option<Self> {
        let form_type = normalize_form(entry.form);
        if form_type.is_empty() || entry.accession_number.trim().is_empty() {
            return None;
        }
        let filing_date = NaiveDate::parse_from_str(entry.filing_date.trim(), "%Y-%m-%d").ok()?;

        Some(Self {
            ticker: company.ticker.clone(),
            cik: company.cik.clone(),
            company_name: company.name.clone(),
            form_type,
            filing_date,
            accession_number: entry.accession_number.trim().to_string(),
            document_url: document_url(
                archives_base,
                &company.cik,
                entry.accession_number.trim(),
                entry.primary_document,
            ),
        })
    }
}

/// A borrowed row of the columnar filing feed.
#[derive(Debug, Clone, Copy)]
pub struct FeedEntry<'a> {
    /// Accession number
    pub accession_number: &'a str,
    /// Form type as published
    pub form: &'a str,
    /// Filing date as published (`YYYY-MM-DD`)
    pub filing_date: &'a str,
    /// Primary document file name, possibly empty
    pub primary_document: &'a str,
}

/// Build the archive URL for a filing document.
///
/// # Example
/// ```
/// # use secfetch_data::model::{document_url, ARCHIVES_BASE_URL};
/// # use secfetch_data::Cik;
/// let cik: Cik = "320193".parse().unwrap();
/// let url = document_url(ARCHIVES_BASE_URL, &cik, "0000320193-23-000106", "aapl-20230930.htm");
/// assert_eq!(
///     url,
///     "https://www.sec.gov/Archives/edgar/data/320193/000032019323000106/aapl-20230930.htm"
/// );
/// ```
pub fn document_url(archives_base: &str, cik: &Cik, accession: &str, primary_document: &str) -> String {
    let accession_no_dashes = accession.replace('-', "");
    let base = archives_base.trim_end_matches('/');
    let document = primary_document.trim();

    if document.is_empty() {
        format!(
            "{}/{}/{}/{}-index.htm",
            base,
            cik.unpadded(),
            accession_no_dashes,
            accession
        )
    } else {
        format!("{}/{}/{}/{}", base, cik.unpadded(), accession_no_dashes, document)
    }
}

/// Upper-case and trim a ticker symbol.
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

/// Upper-case and trim a form type.
pub fn normalize_form(form: &str) -> String {
    form.trim().to_uppercase()
}
