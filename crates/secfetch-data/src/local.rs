//! Offline filing source backed by SEC bulk files on disk.
//!
//! Expects the layout of SEC's nightly bulk downloads: a
//! `company_tickers.json` file and a directory holding the unpacked
//! `submissions.zip` (`CIK##########.json` plus any
//! `CIK##########-submissions-NNN.json` pages).

use crate::edgar::{CikLookup, FilingColumns, PageRef, Submissions};
use crate::error::{DataError, Result};
use crate::model::{ARCHIVES_BASE_URL, Company};
use crate::source::FilingSource;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Filing source reading SEC-format JSON from the filesystem.
#[derive(Debug, Clone)]
pub struct LocalSource {
    tickers: CikLookup,
    submissions_dir: PathBuf,
    archives_base: String,
}

impl LocalSource {
    /// Build a source from an already-parsed ticker mapping.
    pub fn new(tickers: CikLookup, submissions_dir: impl Into<PathBuf>) -> Self {
        Self {
            tickers,
            submissions_dir: submissions_dir.into(),
            archives_base: ARCHIVES_BASE_URL.to_string(),
        }
    }

    /// Load the ticker mapping from `tickers_file` and read submissions from
    /// `submissions_dir`.
    pub async fn open(tickers_file: impl AsRef<Path>, submissions_dir: impl Into<PathBuf>) -> Result<Self> {
        let tickers_file = tickers_file.as_ref();
        let body = tokio::fs::read_to_string(tickers_file).await?;
        let tickers = CikLookup::from_json(&body)?;
        debug!(path = %tickers_file.display(), tickers = tickers.len(), "loaded ticker file");
        Ok(Self::new(tickers, submissions_dir))
    }

    /// Override the base URL used for document links.
    pub fn with_archives_base(mut self, base: impl Into<String>) -> Self {
        self.archives_base = base.into();
        self
    }

    /// Read and parse a file from the submissions directory.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    async fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        if name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(DataError::Parse(format!("Invalid submissions file name: {}", name)));
        }
        let path = self.submissions_dir.join(name);

        let body = match tokio::fs::read_to_string(&path).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| DataError::Parse(format!("Failed to parse {}: {}", path.display(), e)))
    }
}

impl FilingSource for LocalSource {
    async fn resolve(&self, ticker: &str) -> Result<Company> {
        self.tickers.resolve(ticker)
    }

    async fn submissions(&self, company: &Company) -> Result<Submissions> {
        let name = format!("CIK{}.json", company.cik);
        match self.read_json(&name).await? {
            Some(submissions) => Ok(submissions),
            None => {
                debug!(file = %name, "no submissions file, treating as no filings");
                Ok(Submissions {
                    name: company.name.clone(),
                    ..Submissions::default()
                })
            }
        }
    }

    async fn submission_page(&self, page: &PageRef) -> Result<FilingColumns> {
        match self.read_json(&page.name).await? {
            Some(columns) => Ok(columns),
            None => {
                warn!(file = %page.name, "submissions page listed but missing on disk");
                Ok(FilingColumns::default())
            }
        }
    }

    fn archives_base(&self) -> &str {
        &self.archives_base
    }
}
