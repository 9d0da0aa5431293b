//! Filing query pipeline: resolve, fetch, filter, order, truncate.

use crate::edgar::{FilingColumns, PageRef};
use crate::error::Result;
use crate::filter::QueryFilter;
use crate::model::{Company, FilingRecord};
use crate::source::FilingSource;
use std::cmp::Reverse;
use tracing::{debug, info};

/// Default number of older submissions pages a query may fetch.
pub const DEFAULT_MAX_PAGES: usize = 3;

/// Outcome of a filing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// Company the ticker resolved to
    pub company: Company,
    /// Matching filings, most recent first
    pub filings: Vec<FilingRecord>,
    /// Older submissions pages fetched beyond the recent block
    pub pages_fetched: usize,
}

/// Runs filing queries against a [`FilingSource`].
///
/// # Example
/// ```no_run
/// use secfetch_data::{EdgarClient, FilingQuery, QueryFilter};
/// use chrono::NaiveDate;
///
/// # async fn example() -> secfetch_data::Result<()> {
/// let filter = QueryFilter::builder("AAPL")
///     .forms(["10-K"])
///     .date_from(NaiveDate::from_ymd_opt(2023, 1, 1))
///     .limit(Some(3))
///     .build()?;
/// let result = FilingQuery::new(EdgarClient::new()?).run(&filter).await?;
/// for filing in &result.filings {
///     println!("{} {} {}", filing.form_type, filing.filing_date, filing.document_url);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FilingQuery<S> {
    source: S,
    max_pages: usize,
}

impl<S: FilingSource> FilingQuery<S> {
    /// Create a query runner over `source`.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Cap how many older submissions pages may be fetched. Zero restricts
    /// the query to the recent block.
    pub const fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// The underlying source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Execute the query.
    ///
    /// An issuer with no matching filings yields an empty, successful
    /// result.
    ///
    /// # Errors
    /// `DataError::UnknownTicker` if the ticker cannot be resolved and
    /// `DataError::ServiceUnavailable` if the source cannot be reached.
    pub async fn run(&self, filter: &QueryFilter) -> Result<QueryResult> {
        let company = self.source.resolve(filter.ticker()).await?;
        debug!(ticker = %company.ticker, cik = %company.cik, "resolved ticker");

        let submissions = self.source.submissions(&company).await?;
        let archives_base = self.source.archives_base();

        let mut matched = collect(&company, &submissions.filings.recent, filter, archives_base);
        debug!(matched = matched.len(), "filtered recent filings");

        let mut pages_fetched = 0;
        for page in pages_newest_first(&submissions.filings.files) {
            if filter.limit().is_some_and(|limit| matched.len() >= limit) {
                break;
            }
            if !filter.overlaps(page.filing_from, page.filing_to) {
                debug!(page = %page.name, "page outside date range, skipping");
                continue;
            }
            if pages_fetched >= self.max_pages {
                debug!(max_pages = self.max_pages, "page budget exhausted");
                break;
            }

            let columns = self.source.submission_page(page).await?;
            pages_fetched += 1;
            let before = matched.len();
            matched.extend(collect(&company, &columns, filter, archives_base));
            debug!(page = %page.name, matched = matched.len() - before, "filtered page");
        }

        let filings = rank(matched, filter.limit());
        info!(
            ticker = %company.ticker,
            filings = filings.len(),
            pages_fetched,
            "query complete"
        );

        Ok(QueryResult {
            company,
            filings,
            pages_fetched,
        })
    }
}

/// Build records from feed rows and keep those passing `filter`.
///
/// Rows with a blank form or an invalid date are dropped.
fn collect(
    company: &Company,
    columns: &FilingColumns,
    filter: &QueryFilter,
    archives_base: &str,
) -> Vec<FilingRecord> {
    columns
        .entries()
        .filter_map(|entry| {
            let record = FilingRecord::from_entry(company, &entry, archives_base);
            if record.is_none() {
                debug!(accession = entry.accession_number, "skipping malformed feed entry");
            }
            record
        })
        .filter(|record| filter.matches(record))
        .collect()
}

/// Order older pages by their latest filing date, newest first.
fn pages_newest_first(pages: &[PageRef]) -> Vec<&PageRef> {
    let mut ordered: Vec<&PageRef> = pages.iter().collect();
    ordered.sort_by_key(|page| Reverse(page.filing_to));
    ordered
}

/// Sort by filing date descending and keep the first `limit` records.
///
/// The sort is stable, so records sharing a date keep their feed order.
pub fn rank(mut records: Vec<FilingRecord>, limit: Option<usize>) -> Vec<FilingRecord> {
    records.sort_by_key(|record| Reverse(record.filing_date));
    if let Some(limit) = limit {
        records.truncate(limit);
    }
    records
}
