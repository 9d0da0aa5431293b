//! Where filing data comes from.

use crate::edgar::{FilingColumns, PageRef, Submissions};
use crate::error::Result;
use crate::model::Company;
use std::future::Future;

/// A provider of ticker mappings and submissions documents.
///
/// [`crate::edgar::EdgarClient`] talks to SEC over HTTP,
/// [`crate::local::LocalSource`] reads SEC-format files from disk and
/// [`crate::cache::CachedSource`] memoizes ticker resolution of another
/// source.
pub trait FilingSource {
    /// Resolve a ticker to its company.
    ///
    /// # Errors
    /// `DataError::UnknownTicker` when the ticker is not in the mapping.
    fn resolve(&self, ticker: &str) -> impl Future<Output = Result<Company>>;

    /// Fetch the submissions document for a company.
    fn submissions(&self, company: &Company) -> impl Future<Output = Result<Submissions>>;

    /// Fetch one older page of a company's filing history.
    fn submission_page(&self, page: &PageRef) -> impl Future<Output = Result<FilingColumns>>;

    /// Base URL used to build document links.
    fn archives_base(&self) -> &str;
}
