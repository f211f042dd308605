use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// A trade date received as `YYYYMMDD` and used as ISO `YYYY-MM-DD`.
///
/// Only the shape is checked: eight ASCII digits. Calendar validity is not,
/// so `20230230` is accepted and becomes `2023-02-30`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeDate {
    iso: String,
}

impl TradeDate {
    /// The date as `YYYY-MM-DD`.
    pub fn iso(&self) -> &str {
        &self.iso
    }
}

impl FromStr for TradeDate {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::MalformedDate(raw.to_string()));
        }
        Ok(Self {
            iso: format!("{}-{}-{}", &raw[0..4], &raw[4..6], &raw[6..8]),
        })
    }
}

impl fmt::Display for TradeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso)
    }
}
