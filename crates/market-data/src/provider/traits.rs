//! Data source trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{HistoryQuery, Record, Symbol, TradeDate};

/// Trait for end-of-day data sources.
///
/// Implementations return records exactly as the source supplies them.
/// A history body is handed back whole, even when it is not an array.
/// They never retry and never cache; every call is one fetch.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use eod_market_data::provider::EodDataSource;
///
/// struct StaticSource(Vec<Record>);
///
/// #[async_trait]
/// impl EodDataSource for StaticSource {
///     fn id(&self) -> &'static str {
///         "STATIC"
///     }
///
///     async fn fetch_bulk_snapshot(&self, _exchange: &str, _date: &TradeDate)
///         -> Result<Vec<Record>, MarketDataError> {
///         Ok(self.0.clone())
///     }
///
///     // ... fetch_history
/// }
/// ```
#[async_trait]
pub trait EodDataSource: Send + Sync {
    /// Identifier used in logs, e.g. "EODHD" or "FIXTURES".
    fn id(&self) -> &'static str;

    /// Fetch the last-day bulk snapshot for one exchange.
    ///
    /// # Arguments
    ///
    /// * `exchange` - Exchange code, e.g. "SHG"
    /// * `date` - The trade date to snapshot
    async fn fetch_bulk_snapshot(
        &self,
        exchange: &str,
        date: &TradeDate,
    ) -> Result<Vec<Record>, MarketDataError>;

    /// Fetch the daily history series for one symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - `<TICKER>.<EXCHANGE>` identifier
    /// * `query` - Inclusive date bounds and the requested sort order
    async fn fetch_history(
        &self,
        symbol: &Symbol,
        query: &HistoryQuery,
    ) -> Result<Record, MarketDataError>;
}
