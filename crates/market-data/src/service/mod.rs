//! Aggregation services over an [`EodDataSource`].
//!
//! - [`EodService::bulk_snapshot`]: one trade date, two exchanges fetched
//!   concurrently, results concatenated in exchange order
//! - [`EodService::history`]: a date range and a list of symbols, fetched one
//!   after another, results keyed by symbol
//!
//! Both operations validate their whole input before the first fetch and are
//! all-or-nothing: the first failure aborts the operation and no partial
//! result is returned.

mod bulk_snapshot;
mod history;

use std::sync::Arc;

use thiserror::Error;

use crate::errors::{MarketDataError, ValidationError};
use crate::provider::EodDataSource;

pub use bulk_snapshot::{BulkSnapshot, BULK_SNAPSHOT_EXCHANGES};
pub use history::SymbolHistory;

/// Failure of an aggregate operation.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The caller's input was rejected; no fetch was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A fetch failed; the whole operation is aborted.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),
}

impl ServiceError {
    /// Whether the failure is the caller's fault (bad request) rather than
    /// an upstream or server problem.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Entry point for the proxy's two aggregate operations.
#[derive(Clone)]
pub struct EodService {
    source: Arc<dyn EodDataSource>,
}

impl EodService {
    pub fn new(source: Arc<dyn EodDataSource>) -> Self {
        Self { source }
    }

    /// Identifier of the underlying data source.
    pub fn source_id(&self) -> &'static str {
        self.source.id()
    }
}
