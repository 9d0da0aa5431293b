//! Query criteria for a filing lookup.

use crate::error::{DataError, Result};
use crate::model::{FilingRecord, normalize_form, normalize_ticker};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default number of filings returned when the caller gives no limit.
pub const DEFAULT_LIMIT: usize = 10;

/// Largest accepted limit.
pub const MAX_LIMIT: usize = 1000;

/// How results are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One line per filing
    #[default]
    Text,
    /// Aligned table with a company header
    Table,
    /// JSON array of filing objects
    Json,
}

/// Validated filter for one filing query.
///
/// Built through [`QueryFilter::builder`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilter {
    ticker: String,
    form_types: BTreeSet<String>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    limit: Option<usize>,
    output: OutputMode,
}

impl QueryFilter {
    /// Start building a filter for `ticker`.
    pub fn builder(ticker: impl Into<String>) -> QueryFilterBuilder {
        QueryFilterBuilder::new(ticker)
    }

    /// Upper-cased ticker symbol.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Upper-cased form types; empty means every form.
    pub const fn form_types(&self) -> &BTreeSet<String> {
        &self.form_types
    }

    /// Inclusive lower bound on filing date.
    pub const fn date_from(&self) -> Option<NaiveDate> {
        self.date_from
    }

    /// Inclusive upper bound on filing date.
    pub const fn date_to(&self) -> Option<NaiveDate> {
        self.date_to
    }

    /// Cap on the number of returned filings.
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Requested output mode.
    pub const fn output(&self) -> OutputMode {
        self.output
    }

    /// Whether `form` is one of the requested form types (case-insensitive).
    pub fn matches_form(&self, form: &str) -> bool {
        self.form_types.is_empty() || self.form_types.contains(&normalize_form(form))
    }

    /// Whether `date` falls inside the inclusive date range.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.date_from.is_none_or(|from| date >= from) && self.date_to.is_none_or(|to| date <= to)
    }

    /// Whether the closed interval `[from, to]` intersects the date range.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.date_from.is_none_or(|lower| to >= lower) && self.date_to.is_none_or(|upper| from <= upper)
    }

    /// Whether a record passes both the form and the date criteria.
    pub fn matches(&self, record: &FilingRecord) -> bool {
        self.matches_form(&record.form_type) && self.contains_date(record.filing_date)
    }
}

/// Builder for [`QueryFilter`].
#[derive(Debug, Clone)]
pub struct QueryFilterBuilder {
    ticker: String,
    form_types: Vec<String>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    limit: Option<usize>,
    output: OutputMode,
}

impl QueryFilterBuilder {
    /// Create a builder for `ticker` with no criteria.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            form_types: Vec::new(),
            date_from: None,
            date_to: None,
            limit: None,
            output: OutputMode::default(),
        }
    }

    /// Add form types to match.
    pub fn forms<I, S>(mut self, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.form_types
            .extend(forms.into_iter().map(|f| f.as_ref().to_string()));
        self
    }

    /// Set the inclusive lower date bound.
    pub const fn date_from(mut self, date: Option<NaiveDate>) -> Self {
        self.date_from = date;
        self
    }

    /// Set the inclusive upper date bound.
    pub const fn date_to(mut self, date: Option<NaiveDate>) -> Self {
        self.date_to = date;
        self
    }

    /// Set the result cap.
    pub const fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Set the output mode.
    pub const fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Validate and build the filter.
    ///
    /// # Errors
    /// Returns `DataError::InvalidFilter` for a blank ticker, an inverted
    /// date range, or a limit outside `1..=1000`.
    pub fn build(self) -> Result<QueryFilter> {
        let ticker = normalize_ticker(&self.ticker);
        if ticker.is_empty() {
            return Err(DataError::InvalidFilter("ticker cannot be empty".to_string()));
        }

        if let (Some(from), Some(to)) = (self.date_from, self.date_to)
            && from > to
        {
            return Err(DataError::InvalidFilter(format!(
                "date_from {} is after date_to {}",
                from, to
            )));
        }

        if let Some(limit) = self.limit
            && !(1..=MAX_LIMIT).contains(&limit)
        {
            return Err(DataError::InvalidFilter(format!(
                "limit must be between 1 and {}, got {}",
                MAX_LIMIT, limit
            )));
        }

        let form_types = self
            .form_types
            .iter()
            .map(|f| normalize_form(f))
            .filter(|f| !f.is_empty())
            .collect();

        Ok(QueryFilter {
            ticker,
            form_types,
            date_from: self.date_from,
            date_to: self.date_to,
            limit: self.limit,
            output: self.output,
        })
    }
}
