//! Error types for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: failures while talking to a data source
//! - [`ValidationError`]: malformed caller input, detected before any fetch

use thiserror::Error;

/// Errors that can occur while fetching records from a data source.
///
/// None of these are retried. Every variant carries a message that is
/// surfaced verbatim to the API caller.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The live source was asked to fetch without an upstream access token.
    #[error("EODHD_API_TOKEN is not configured")]
    MissingApiToken,

    /// The upstream provider answered with a non-success status.
    #[error("Failed to fetch {resource}: {status}")]
    UpstreamStatus {
        /// What was being fetched, e.g. "bulk last day data"
        resource: &'static str,
        /// The HTTP status returned by the provider
        status: reqwest::StatusCode,
    },

    /// The upstream provider answered with a body that is not JSON.
    #[error("Failed to decode {resource}: {message}")]
    Decode {
        /// What was being fetched
        resource: &'static str,
        /// The decoder's error message
        message: String,
    },

    /// No fixture exists for the requested key.
    #[error("Fixture not found: {0}")]
    FixtureNotFound(String),

    /// The fixture exists but could not be read.
    #[error("Failed to read fixture {path}: {message}")]
    FixtureRead {
        /// Path of the fixture file
        path: String,
        /// The I/O error message
        message: String,
    },

    /// The fixture was read but is not a JSON array of records.
    #[error("Invalid fixture {path}: {message}")]
    FixtureUnparsable {
        /// Path of the fixture file
        path: String,
        /// The parser's error message
        message: String,
    },

    /// A network error occurred while communicating with the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Caller input that fails validation.
///
/// The display strings are the exact messages returned in the API's
/// failure envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A date string that is not exactly eight ASCII digits.
    #[error("{0:?} is not a YYYYMMDD date")]
    MalformedDate(String),

    #[error("trade_date must be YYYYMMDD")]
    InvalidTradeDate,

    #[error("start_date and end_date must be YYYYMMDD")]
    InvalidDateRange,

    #[error("symbols must be a non-empty array")]
    EmptySymbols,

    /// A symbol without the `<TICKER>.<EXCHANGE>` separator.
    #[error("Invalid symbol format: {0}")]
    InvalidSymbol(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_message_names_the_variable() {
        let error = MarketDataError::MissingApiToken;
        assert_eq!(error.to_string(), "EODHD_API_TOKEN is not configured");
    }

    #[test]
    fn test_upstream_status_includes_reason_phrase() {
        let error = MarketDataError::UpstreamStatus {
            resource: "bulk last day data",
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(
            error.to_string(),
            "Failed to fetch bulk last day data: 500 Internal Server Error"
        );

        let error = MarketDataError::UpstreamStatus {
            resource: "historical data",
            status: reqwest::StatusCode::UNAUTHORIZED,
        };
        assert_eq!(
            error.to_string(),
            "Failed to fetch historical data: 401 Unauthorized"
        );
    }

    #[test]
    fn test_fixture_errors_display() {
        let error = MarketDataError::FixtureNotFound("fixtures/bulk-XXX.json".to_string());
        assert_eq!(error.to_string(), "Fixture not found: fixtures/bulk-XXX.json");

        let error = MarketDataError::FixtureUnparsable {
            path: "fixtures/bulk-SHG.json".to_string(),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid fixture fixtures/bulk-SHG.json: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::InvalidTradeDate.to_string(),
            "trade_date must be YYYYMMDD"
        );
        assert_eq!(
            ValidationError::InvalidDateRange.to_string(),
            "start_date and end_date must be YYYYMMDD"
        );
        assert_eq!(
            ValidationError::EmptySymbols.to_string(),
            "symbols must be a non-empty array"
        );
        assert_eq!(
            ValidationError::InvalidSymbol("600519".to_string()).to_string(),
            "Invalid symbol format: 600519"
        );
    }
}
