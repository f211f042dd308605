//! End-of-day data source abstractions and implementations.
//!
//! This module contains:
//! - The `EodDataSource` trait that every source implements
//! - `EodhdProvider`, the live source backed by the EODHD API
//! - `FixtureProvider`, the simulated source backed by JSON files
//!
//! A process picks one source at startup via [`DataSourceMode`] and keeps it
//! for its whole lifetime; per-request code only sees the trait.

mod traits;

pub mod eodhd;
pub mod fixtures;

pub use traits::EodDataSource;

/// Which data source a process serves from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataSourceMode {
    /// Calls the upstream provider over HTTP.
    #[default]
    Live,
    /// Reads canned fixtures from disk; no network access.
    Simulated,
}

impl DataSourceMode {
    /// Interprets a `MOCK_MODE`-style flag: `1` or `true` selects simulated.
    pub fn from_mock_flag(flag: Option<&str>) -> Self {
        match flag.map(str::trim) {
            Some(value) if value == "1" || value.eq_ignore_ascii_case("true") => Self::Simulated,
            _ => Self::Live,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_flag() {
        assert_eq!(DataSourceMode::from_mock_flag(Some("1")), DataSourceMode::Simulated);
        assert_eq!(DataSourceMode::from_mock_flag(Some("true")), DataSourceMode::Simulated);
        assert_eq!(DataSourceMode::from_mock_flag(Some("TRUE")), DataSourceMode::Simulated);
        assert_eq!(DataSourceMode::from_mock_flag(Some("0")), DataSourceMode::Live);
        assert_eq!(DataSourceMode::from_mock_flag(Some("yes")), DataSourceMode::Live);
        assert_eq!(DataSourceMode::from_mock_flag(None), DataSourceMode::Live);
    }
}
