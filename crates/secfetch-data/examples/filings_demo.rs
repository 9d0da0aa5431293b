//! Demo of a filing query over SEC-format files on disk.
//!
//! This example demonstrates how to:
//! - Load a ticker mapping and submissions directory with `LocalSource`
//! - Build a validated `QueryFilter`
//! - Run a `FilingQuery` and walk the results
//!
//! Run with: cargo run -p secfetch-data --example filings_demo

use chrono::NaiveDate;
use secfetch_data::{FilingQuery, LocalSource, QueryFilter};

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source = LocalSource::open(
        format!("{}/company_tickers.json", FIXTURES),
        format!("{}/submissions", FIXTURES),
    )
    .await?;

    // Annual reports filed since the start of 2023
    let filter = QueryFilter::builder("AAPL")
        .forms(["10-K"])
        .date_from(NaiveDate::from_ymd_opt(2023, 1, 1))
        .limit(Some(3))
        .build()?;

    let query = FilingQuery::new(source);
    let result = query.run(&filter).await?;

    println!("{} ({}):", result.company.name, result.company.ticker);
    println!("  CIK: {}", result.company.cik);

    println!("\n10-K filings since 2023 ({} total):", result.filings.len());
    for filing in &result.filings {
        println!("  {} - {}", filing.filing_date, filing.accession_number);
        println!("    {}", filing.document_url);
    }

    // Older history lives in separate pages, fetched only when needed
    let historic = QueryFilter::builder("AAPL")
        .forms(["10-K"])
        .date_to(NaiveDate::from_ymd_opt(2013, 12, 31))
        .build()?;
    let result = query.run(&historic).await?;

    println!(
        "\n10-K filings through 2013 ({} older pages read):",
        result.pages_fetched
    );
    for filing in &result.filings {
        println!("  {} - {}", filing.filing_date, filing.accession_number);
    }

    Ok(())
}
