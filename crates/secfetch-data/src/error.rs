//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while resolving tickers and fetching filings.
#[derive(Debug, Error)]
pub enum DataError {
    /// Ticker is not present in the SEC ticker mapping
    #[error("Ticker '{0}' not found")]
    UnknownTicker(String),

    /// Network failure, unexpected HTTP status, or an undecodable response
    #[error("EDGAR service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Query filter failed validation
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// CIK is not a run of 1 to 10 digits
    #[error("Invalid CIK: {0}")]
    InvalidCik(String),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Whether the error means the ticker could not be resolved.
    pub const fn is_unknown_ticker(&self) -> bool {
        matches!(self, Self::UnknownTicker(_))
    }

    /// Whether the error came from talking to the EDGAR service.
    pub const fn is_service_unavailable(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_))
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        Self::ServiceUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert!(DataError::UnknownTicker("ZZZZ".to_string()).is_unknown_ticker());
        assert!(DataError::ServiceUnavailable("HTTP 503".to_string()).is_service_unavailable());
        assert!(!DataError::Parse("bad".to_string()).is_unknown_ticker());
    }

    #[test]
    fn test_unknown_ticker_message() {
        let err = DataError::UnknownTicker("ZZZZ".to_string());
        assert_eq!(err.to_string(), "Ticker 'ZZZZ' not found");
    }
}
