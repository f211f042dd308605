//! Fixture-backed data source for offline operation.
//!
//! Reads pre-recorded JSON arrays from a directory instead of calling the
//! upstream provider:
//! - `bulk-<EXCHANGE>.json` for bulk snapshots (the date is ignored)
//! - `eod-<TICKER>.<EXCHANGE>.json` for history series
//!
//! History rows are filtered to the requested range and sorted by their
//! `date` field here, since no upstream does it for us.

use std::cmp::Ordering;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use crate::errors::MarketDataError;
use crate::models::{HistoryQuery, Record, SortOrder, Symbol, TradeDate};
use crate::provider::EodDataSource;

const PROVIDER_ID: &str = "FIXTURES";

/// Simulated source reading JSON fixtures from `root`.
pub struct FixtureProvider {
    root: PathBuf,
}

impl FixtureProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a fixture file name under the root.
    ///
    /// Keys come from request input, so anything that could leave the
    /// fixture directory is reported as not found.
    fn fixture_path(&self, file_name: &str) -> Result<PathBuf, MarketDataError> {
        if file_name.contains(['/', '\\']) || file_name.contains("..") {
            return Err(MarketDataError::FixtureNotFound(file_name.to_string()));
        }
        Ok(self.root.join(file_name))
    }

    async fn load(&self, file_name: &str) -> Result<Vec<Record>, MarketDataError> {
        let path = self.fixture_path(file_name)?;
        let display = path.display().to_string();
        debug!("{} loading {}", PROVIDER_ID, display);

        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => MarketDataError::FixtureNotFound(display.clone()),
                _ => MarketDataError::FixtureRead {
                    path: display.clone(),
                    message: e.to_string(),
                },
            })?;

        serde_json::from_str::<Vec<Record>>(&raw).map_err(|e| MarketDataError::FixtureUnparsable {
            path: display,
            message: e.to_string(),
        })
    }
}

fn row_date(row: &Record) -> Option<&str> {
    row.get("date").and_then(Value::as_str)
}

/// Keep rows inside the query range and sort them by `date`.
///
/// A row without a string `date` survives only an unbounded query, and
/// orders as earlier than every dated row. The sort is stable.
fn filter_and_sort(rows: Vec<Record>, query: &HistoryQuery) -> Vec<Record> {
    let unbounded = query.from.is_none() && query.to.is_none();
    let mut kept: Vec<Record> = rows
        .into_iter()
        .filter(|row| match row_date(row) {
            Some(date) => query.contains(date),
            None => unbounded,
        })
        .collect();

    kept.sort_by(|a, b| {
        let ordering: Ordering = row_date(a).cmp(&row_date(b));
        match query.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    kept
}

#[async_trait]
impl EodDataSource for FixtureProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_bulk_snapshot(
        &self,
        exchange: &str,
        _date: &TradeDate,
    ) -> Result<Vec<Record>, MarketDataError> {
        self.load(&format!("bulk-{}.json", exchange)).await
    }

    async fn fetch_history(
        &self,
        symbol: &Symbol,
        query: &HistoryQuery,
    ) -> Result<Record, MarketDataError> {
        let rows = self.load(&format!("eod-{}.json", symbol)).await?;
        Ok(Record::Array(filter_and_sort(rows, query)))
    }
}
