//! EOD Market Data Crate
//!
//! This crate fetches end-of-day equities data for the EOD proxy and shapes
//! it into the aggregated responses the HTTP layer returns.
//!
//! # Overview
//!
//! The crate supports:
//! - Bulk last-day snapshots per exchange
//! - Daily history series per symbol
//! - A live source backed by the EODHD API
//! - A simulated source backed by JSON fixtures on disk
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |   EodService     |  (validation, fan-out, aggregation)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  EodDataSource   |  (capability chosen once at startup)
//! +------------------+
//!     |          |
//!     v          v
//! +--------+ +-----------+
//! | EODHD  | | Fixtures  |
//! +--------+ +-----------+
//! ```
//!
//! # Core Types
//!
//! - [`TradeDate`] - Validated `YYYYMMDD` date rendered as ISO `YYYY-MM-DD`
//! - [`Symbol`] - `<TICKER>.<EXCHANGE>` instrument identifier
//! - [`Record`] - Opaque upstream record passed through unmodified
//! - [`HistoryQuery`] - Date bounds and sort order for a history fetch
//! - [`EodService`] - Bulk snapshot and history aggregation

pub mod errors;
pub mod models;
pub mod provider;
pub mod service;

pub use errors::{MarketDataError, ValidationError};
pub use models::{HistoryQuery, Record, SortOrder, Symbol, TradeDate};
pub use provider::eodhd::EodhdProvider;
pub use provider::fixtures::FixtureProvider;
pub use provider::{DataSourceMode, EodDataSource};
pub use service::{
    BulkSnapshot, EodService, ServiceError, SymbolHistory, BULK_SNAPSHOT_EXCHANGES,
};
