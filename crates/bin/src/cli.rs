//! Command-line arguments.

use chrono::NaiveDate;
use clap::{ArgAction, Parser};
use secfetch_data::filter::DEFAULT_LIMIT;
use secfetch_data::query::DEFAULT_MAX_PAGES;
use secfetch_data::{OutputMode, QueryFilter};
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  secfetch AAPL
  secfetch AAPL --form 10-K --limit 5
  secfetch MSFT --form 10-Q 10-K --date-from 2023-01-01 --date-to 2023-12-31
  secfetch TSLA --json";

#[derive(Debug, Parser)]
#[command(name = "secfetch")]
#[command(about = "Fetch SEC EDGAR filings for a company", long_about = None)]
#[command(version, after_help = EXAMPLES)]
pub(crate) struct Cli {
    /// Company ticker symbol
    pub(crate) ticker: String,

    /// Filter by form type(s)
    #[arg(long = "form", value_name = "TYPE", num_args = 1..)]
    pub(crate) forms: Vec<String>,

    /// Start date, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub(crate) date_from: Option<NaiveDate>,

    /// End date, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub(crate) date_to: Option<NaiveDate>,

    /// Maximum results
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub(crate) limit: usize,

    /// Output as JSON
    #[arg(long, conflicts_with = "table")]
    pub(crate) json: bool,

    /// Output as a table with a company header
    #[arg(long)]
    pub(crate) table: bool,

    /// Older submissions pages to scan when recent filings fall short
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_PAGES)]
    pub(crate) max_pages: usize,

    /// Read the ticker mapping from a local company_tickers.json
    #[arg(long, value_name = "PATH", requires = "submissions_dir")]
    pub(crate) tickers_file: Option<PathBuf>,

    /// Read submissions from a local directory of CIK##########.json files
    #[arg(long, value_name = "DIR", requires = "tickers_file")]
    pub(crate) submissions_dir: Option<PathBuf>,

    /// User-Agent sent to SEC (name and contact address)
    #[arg(long, env = "SECFETCH_USER_AGENT")]
    pub(crate) user_agent: Option<String>,

    /// Disable the ticker mapping cache
    #[arg(long)]
    pub(crate) no_cache: bool,

    /// Ignore cached ticker mappings and re-resolve
    #[arg(long, conflicts_with = "no_cache")]
    pub(crate) refresh: bool,

    /// Location of the ticker mapping cache
    #[arg(long, value_name = "PATH", env = "SECFETCH_CACHE")]
    pub(crate) cache_path: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub(crate) verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub(crate) quiet: bool,
}

impl Cli {
    /// Requested output mode.
    pub(crate) const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.table {
            OutputMode::Table
        } else {
            OutputMode::Text
        }
    }

    /// Build the query filter from the arguments.
    pub(crate) fn filter(&self) -> secfetch_data::Result<QueryFilter> {
        QueryFilter::builder(self.ticker.as_str())
            .forms(&self.forms)
            .date_from(self.date_from)
            .date_to(self.date_to)
            .limit(Some(self.limit))
            .output(self.output_mode())
            .build()
    }
}

/// Parse date string in YYYY-MM-DD format.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format: {}. Use YYYY-MM-DD", s))
}
