//! Rendering of filing query results.
//!
//! Three layouts are supported: plain text with one line per filing, an
//! aligned table headed by the company, and a pretty-printed JSON array.

use secfetch_data::{Company, FilingRecord, OutputMode, QueryResult};
use std::io::Write;
use thiserror::Error;

/// Printed in text and table layouts when nothing matched.
pub const NO_FILINGS: &str = "No filings found.";

/// Widest company name shown in the table layout.
const COMPANY_WIDTH: usize = 40;

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Whether the reader hung up before the report was written.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

/// A company and its filings, ready to be rendered.
#[derive(Debug, Clone, Copy)]
pub struct FilingReport<'a> {
    company: &'a Company,
    filings: &'a [FilingRecord],
}

impl<'a> FilingReport<'a> {
    /// Create a report over already-ordered filings.
    pub const fn new(company: &'a Company, filings: &'a [FilingRecord]) -> Self {
        Self { company, filings }
    }

    /// Create a report from a query result.
    pub fn from_result(result: &'a QueryResult) -> Self {
        Self::new(&result.company, &result.filings)
    }

    /// Render in the given mode.
    pub fn render(&self, mode: OutputMode) -> Result<String, RenderError> {
        match mode {
            OutputMode::Text => Ok(self.to_text()),
            OutputMode::Table => Ok(self.to_table()),
            OutputMode::Json => self.to_json(),
        }
    }

    /// Render in the given mode and write to `writer` with a trailing newline.
    pub fn write_to<W: Write>(&self, writer: &mut W, mode: OutputMode) -> Result<(), RenderError> {
        let rendered = self.render(mode)?;
        writeln!(writer, "{}", rendered)?;
        writer.flush()?;
        Ok(())
    }

    /// One line per filing: ticker, form type, filing date, document URL.
    pub fn to_text(&self) -> String {
        if self.filings.is_empty() {
            return NO_FILINGS.to_string();
        }

        let form_width = self
            .filings
            .iter()
            .map(|f| f.form_type.chars().count())
            .max()
            .unwrap_or(0);

        self.filings
            .iter()
            .map(|f| {
                format!(
                    "{}  {:<width$}  {}  {}",
                    f.ticker,
                    f.form_type,
                    f.filing_date,
                    f.document_url,
                    width = form_width
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Company header, aligned table of filings, and a total line.
    pub fn to_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Filings for {} ({})\n",
            self.company.name, self.company.ticker
        ));
        output.push_str(&format!("CIK: {}\n\n", self.company.cik));

        if self.filings.is_empty() {
            output.push_str(NO_FILINGS);
            output.push('\n');
        } else {
            let headers = ["Date", "Form Type", "Company", "Accession Number"];
            let rows: Vec<[String; 4]> = self
                .filings
                .iter()
                .map(|f| {
                    [
                        f.filing_date.to_string(),
                        f.form_type.clone(),
                        f.company_name.chars().take(COMPANY_WIDTH).collect(),
                        f.accession_number.clone(),
                    ]
                })
                .collect();

            let mut widths = headers.map(|h| h.chars().count());
            for row in &rows {
                for (width, cell) in widths.iter_mut().zip(row) {
                    *width = (*width).max(cell.chars().count());
                }
            }

            let header_line = join_padded(headers.iter().copied(), &widths);
            output.push_str(&header_line);
            output.push('\n');
            output.push_str(&"-".repeat(header_line.chars().count()));
            output.push('\n');

            for row in &rows {
                output.push_str(&join_padded(row.iter().map(String::as_str), &widths));
                output.push('\n');
            }
        }

        output.push_str(&format!("\nTotal: {} filing(s)", self.filings.len()));
        output
    }

    /// Pretty-printed JSON array of filing objects.
    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self.filings)?)
    }
}

/// Left-align cells to their column widths, joined by ` | `.
fn join_padded<'s>(cells: impl Iterator<Item = &'s str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(" | ")
}
