//! Market data models
//!
//! This module contains the data types shared by the sources and services:
//! - `types` - Opaque record alias and sort order
//! - `trade_date` - Validated `YYYYMMDD` date (TradeDate)
//! - `symbol` - `<TICKER>.<EXCHANGE>` identifier (Symbol)
//! - `query` - History fetch parameters (HistoryQuery)

mod query;
mod symbol;
mod trade_date;
mod types;

pub use query::HistoryQuery;
pub use symbol::Symbol;
pub use trade_date::TradeDate;
pub use types::{Record, SortOrder};
