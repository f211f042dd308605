use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::ValidationError;

/// Instrument identifier of the form `<TICKER>.<EXCHANGE>`, e.g. `600519.SHG`.
///
/// Only the presence of the separator is validated; the parts are opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ticker segment (before the first `.`).
    pub fn ticker(&self) -> &str {
        self.0.split('.').next().unwrap_or_default()
    }

    /// Exchange segment (between the first and second `.`).
    pub fn exchange(&self) -> &str {
        self.0.split('.').nth(1).unwrap_or_default()
    }
}

impl FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if !raw.contains('.') {
            return Err(ValidationError::InvalidSymbol(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_ticker_and_exchange() {
        let symbol: Symbol = "600519.SHG".parse().unwrap();
        assert_eq!(symbol.as_str(), "600519.SHG");
        assert_eq!(symbol.ticker(), "600519");
        assert_eq!(symbol.exchange(), "SHG");
    }

    #[test]
    fn test_requires_separator() {
        assert_eq!(
            "600519".parse::<Symbol>(),
            Err(ValidationError::InvalidSymbol("600519".to_string()))
        );
        assert!("".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_extra_segments_are_ignored_when_splitting() {
        let symbol: Symbol = "BRK.B.US".parse().unwrap();
        assert_eq!(symbol.ticker(), "BRK");
        assert_eq!(symbol.exchange(), "B");
        assert_eq!(symbol.to_string(), "BRK.B.US");
    }

    #[test]
    fn test_empty_segments_are_accepted() {
        let symbol: Symbol = ".SHG".parse().unwrap();
        assert_eq!(symbol.ticker(), "");
        assert_eq!(symbol.exchange(), "SHG");
    }
}
