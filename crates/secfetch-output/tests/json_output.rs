//! Integration tests for the JSON and text layouts.

use chrono::NaiveDate;
use secfetch_data::{Company, FilingRecord, OutputMode};
use secfetch_output::FilingReport;
use serde_json::Value;

fn sample() -> (Company, Vec<FilingRecord>) {
    let company = Company::new("AAPL", "320193".parse().unwrap(), "Apple Inc.");
    let filings = vec![
        FilingRecord {
            ticker: "AAPL".to_string(),
            cik: company.cik.clone(),
            company_name: company.name.clone(),
            form_type: "10-K".to_string(),
            filing_date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            accession_number: "0000320193-24-000123".to_string(),
            document_url: "https://www.sec.gov/Archives/edgar/data/320193/000032019324000123/aapl-20240928.htm"
                .to_string(),
        },
        FilingRecord {
            ticker: "AAPL".to_string(),
            cik: company.cik.clone(),
            company_name: company.name.clone(),
            form_type: "10-K".to_string(),
            filing_date: NaiveDate::from_ymd_opt(2023, 11, 3).unwrap(),
            accession_number: "0000320193-23-000106".to_string(),
            document_url: "https://www.sec.gov/Archives/edgar/data/320193/000032019323000106/aapl-20230930.htm"
                .to_string(),
        },
    ];
    (company, filings)
}

#[test]
fn test_json_objects_have_exactly_the_record_keys() {
    let (company, filings) = sample();
    let json = FilingReport::new(&company, &filings)
        .render(OutputMode::Json)
        .unwrap();

    let parsed: Value = serde_json::from_str(&json).unwrap();
    let array = parsed.as_array().unwrap();
    assert_eq!(array.len(), 2);

    let mut keys: Vec<_> = array[0].as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "accession_number",
            "cik",
            "company_name",
            "document_url",
            "filing_date",
            "form_type",
            "ticker"
        ]
    );
    assert_eq!(array[0]["filing_date"], "2024-11-01");
    assert_eq!(array[0]["cik"], "0000320193");
}

#[test]
fn test_json_preserves_order_and_parses_back() {
    let (company, filings) = sample();
    let json = FilingReport::new(&company, &filings).to_json().unwrap();

    let back: Vec<FilingRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, filings);
}

#[test]
fn test_text_lines_carry_ticker_form_date_url() {
    let (company, filings) = sample();
    let text = FilingReport::new(&company, &filings).to_text();

    for (line, filing) in text.lines().zip(&filings) {
        let date = filing.filing_date.to_string();
        let fields: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(
            fields,
            vec![
                filing.ticker.as_str(),
                filing.form_type.as_str(),
                date.as_str(),
                filing.document_url.as_str()
            ]
        );
    }
}
