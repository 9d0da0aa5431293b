//! secfetch CLI binary.
//!
//! Fetches SEC EDGAR filings for a ticker and prints them as text, a table,
//! or JSON.

mod cache_manager;
mod cli;
mod logging;
mod settings;

use clap::Parser;
use cli::Cli;
use secfetch_data::{
    CachedSource, DataError, EdgarClient, FilingQuery, FilingSource, LocalSource, QueryFilter,
    QueryResult,
};
use secfetch_output::{FilingReport, RenderError};
use settings::{Settings, SourceKind};
use std::error::Error;
use std::io;
use std::process;
use tracing::{debug, warn};

/// Exit code when the ticker is not in SEC's mapping.
const EXIT_UNKNOWN_TICKER: i32 = 3;
/// Exit code when EDGAR could not be reached or answered badly.
const EXIT_SERVICE_UNAVAILABLE: i32 = 4;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    debug!(?cli, "command line input recorded");

    if let Err(e) = run(cli).await {
        if is_broken_pipe(e.as_ref()) {
            debug!("stdout closed before the report was written");
            return;
        }
        eprintln!("Error: {}", e);
        process::exit(exit_code(e.as_ref()));
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let filter = cli.filter()?;
    let settings = Settings::from_cli(&cli);

    let result = match &settings.source {
        SourceKind::Local {
            tickers_file,
            submissions_dir,
        } => {
            let source = LocalSource::open(tickers_file, submissions_dir).await?;
            execute(source, &filter, settings.max_pages).await?
        }
        SourceKind::Edgar => {
            let client = EdgarClient::with_config(settings.client.clone())?;
            if settings.fetch.use_cache {
                match cache_manager::open_cache(&settings.fetch.cache_path) {
                    Ok(cache) => {
                        let source =
                            CachedSource::new(client, cache).with_ttl(settings.fetch.ttl());
                        execute(source, &filter, settings.max_pages).await?
                    }
                    Err(e) => {
                        warn!(
                            path = %settings.fetch.cache_path.display(),
                            error = %e,
                            "ticker cache unavailable, continuing without it"
                        );
                        execute(client, &filter, settings.max_pages).await?
                    }
                }
            } else {
                execute(client, &filter, settings.max_pages).await?
            }
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    FilingReport::from_result(&result).write_to(&mut handle, filter.output())?;

    Ok(())
}

async fn execute<S: FilingSource>(
    source: S,
    filter: &QueryFilter,
    max_pages: usize,
) -> secfetch_data::Result<QueryResult> {
    FilingQuery::new(source)
        .with_max_pages(max_pages)
        .run(filter)
        .await
}

/// Map an error to the process exit code.
fn exit_code(err: &(dyn Error + 'static)) -> i32 {
    match err.downcast_ref::<DataError>() {
        Some(e) if e.is_unknown_ticker() => EXIT_UNKNOWN_TICKER,
        Some(e) if e.is_service_unavailable() => EXIT_SERVICE_UNAVAILABLE,
        _ => 1,
    }
}

/// Whether the error is the reader closing stdout early, as with `| head`.
fn is_broken_pipe(err: &(dyn Error + 'static)) -> bool {
    err.downcast_ref::<RenderError>()
        .is_some_and(RenderError::is_broken_pipe)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (String, String) {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../secfetch-data/tests/fixtures");
        (
            format!("{}/company_tickers.json", dir),
            format!("{}/submissions", dir),
        )
    }

    #[test]
    fn test_exit_codes() {
        let unknown: Box<dyn Error> = Box::new(DataError::UnknownTicker("ZZZZ".to_string()));
        assert_eq!(exit_code(unknown.as_ref()), EXIT_UNKNOWN_TICKER);

        let down: Box<dyn Error> = Box::new(DataError::ServiceUnavailable("HTTP 503".to_string()));
        assert_eq!(exit_code(down.as_ref()), EXIT_SERVICE_UNAVAILABLE);

        let invalid: Box<dyn Error> = Box::new(DataError::InvalidFilter("limit".to_string()));
        assert_eq!(exit_code(invalid.as_ref()), 1);

        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        let render: Box<dyn Error> = Box::new(RenderError::Io(io_err));
        assert_eq!(exit_code(render.as_ref()), 1);
    }

    #[test]
    fn test_broken_pipe_detection() {
        let closed: Box<dyn Error> =
            Box::new(RenderError::Io(io::ErrorKind::BrokenPipe.into()));
        assert!(is_broken_pipe(closed.as_ref()));

        let other: Box<dyn Error> = Box::new(RenderError::Io(io::ErrorKind::Other.into()));
        assert!(!is_broken_pipe(other.as_ref()));

        let raw: Box<dyn Error> = Box::new(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(!is_broken_pipe(raw.as_ref()));

        let unknown: Box<dyn Error> = Box::new(DataError::UnknownTicker("ZZZZ".to_string()));
        assert!(!is_broken_pipe(unknown.as_ref()));
    }

    #[tokio::test]
    async fn test_run_offline_json() {
        let (tickers, submissions) = fixtures();
        let cli = Cli::try_parse_from([
            "secfetch",
            "AAPL",
            "--form",
            "10-K",
            "--date-from",
            "2023-01-01",
            "--limit",
            "3",
            "--json",
            "--tickers-file",
            tickers.as_str(),
            "--submissions-dir",
            submissions.as_str(),
        ])
        .unwrap();

        assert!(run(cli).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_offline_unknown_ticker_exit_code() {
        let (tickers, submissions) = fixtures();
        let cli = Cli::try_parse_from([
            "secfetch",
            "ZZZZ",
            "--tickers-file",
            tickers.as_str(),
            "--submissions-dir",
            submissions.as_str(),
        ])
        .unwrap();

        let err = run(cli).await.unwrap_err();
        assert_eq!(exit_code(err.as_ref()), EXIT_UNKNOWN_TICKER);
    }
}
