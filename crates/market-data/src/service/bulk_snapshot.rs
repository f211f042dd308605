use futures::future::try_join;
use log::{debug, warn};
use serde::Serialize;

use super::{EodService, ServiceError};
use crate::errors::ValidationError;
use crate::models::{Record, TradeDate};

/// Exchanges covered by a bulk snapshot, in response order (Shanghai, Shenzhen).
pub const BULK_SNAPSHOT_EXCHANGES: [&str; 2] = ["SHG", "SHE"];

/// Combined last-day snapshot across [`BULK_SNAPSHOT_EXCHANGES`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkSnapshot {
    pub count: usize,
    pub items: Vec<Record>,
}

impl EodService {
    /// Fetch the last-day snapshot of both exchanges for `trade_date`.
    ///
    /// `trade_date` must be eight ASCII digits (`YYYYMMDD`); anything else,
    /// including a missing value, is rejected before any fetch. The two
    /// exchanges are fetched concurrently. If either fails the other is
    /// dropped and the error is returned. Items are the first exchange's
    /// records followed by the second's, each in source order.
    pub async fn bulk_snapshot(
        &self,
        trade_date: Option<&str>,
    ) -> Result<BulkSnapshot, ServiceError> {
        let date: TradeDate = trade_date
            .ok_or(ValidationError::InvalidTradeDate)?
            .parse::<TradeDate>()
            .map_err(|_| ValidationError::InvalidTradeDate)?;

        let [first, second] = BULK_SNAPSHOT_EXCHANGES;
        debug!(
            "Bulk snapshot {} for {}+{} via {}",
            date,
            first,
            second,
            self.source.id()
        );

        let (mut items, tail) = try_join(
            self.source.fetch_bulk_snapshot(first, &date),
            self.source.fetch_bulk_snapshot(second, &date),
        )
        .await
        .map_err(|e| {
            warn!("Bulk snapshot for {} failed: {}", date, e);
            e
        })?;

        items.extend(tail);
        Ok(BulkSnapshot {
            count: items.len(),
            items,
        })
    }
}
