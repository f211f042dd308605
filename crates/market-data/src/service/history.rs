use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use super::{EodService, ServiceError};
use crate::errors::ValidationError;
use crate::models::{HistoryQuery, Record, SortOrder, Symbol, TradeDate};

/// History series for one requested symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolHistory {
    pub symbol: Symbol,
    /// Decoded history body; an array of daily bars unless the source sent
    /// something else.
    pub rows: Record,
}

fn parse_symbol(value: &Value) -> Result<Symbol, ValidationError> {
    match value {
        Value::String(raw) => raw.parse(),
        other => Err(ValidationError::InvalidSymbol(other.to_string())),
    }
}

fn parse_range_bound(raw: Option<&str>) -> Result<TradeDate, ValidationError> {
    raw.and_then(|raw| raw.parse::<TradeDate>().ok())
        .ok_or(ValidationError::InvalidDateRange)
}

impl EodService {
    /// Fetch ascending daily history for each symbol over `[start_date, end_date]`.
    ///
    /// Validation runs in this order, all before the first fetch:
    /// 1. `symbols` is non-empty
    /// 2. both dates are `YYYYMMDD`
    /// 3. every symbol is a string containing a `.` separator
    ///
    /// Symbols are then fetched one at a time, in request order. The first
    /// failed fetch aborts the call; later symbols are not fetched.
    pub async fn history(
        &self,
        symbols: &[Value],
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<SymbolHistory>, ServiceError> {
        if symbols.is_empty() {
            return Err(ValidationError::EmptySymbols.into());
        }
        let from = parse_range_bound(start_date)?;
        let to = parse_range_bound(end_date)?;
        let symbols = symbols
            .iter()
            .map(parse_symbol)
            .collect::<Result<Vec<_>, _>>()?;

        let query = HistoryQuery::between(from, to, SortOrder::Ascending);
        debug!(
            "History for {} symbol(s) via {}",
            symbols.len(),
            self.source.id()
        );

        // TODO: bounded concurrent fan-out once the upstream rate budget is known
        let mut data = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let rows = self
                .source
                .fetch_history(&symbol, &query)
                .await
                .map_err(|e| {
                    warn!("History fetch for {} failed: {}", symbol, e);
                    e
                })?;
            data.push(SymbolHistory { symbol, rows });
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::service::test_support::ScriptedSource;

    fn scripted_service(source: ScriptedSource) -> (EodService, Arc<ScriptedSource>) {
        let source = Arc::new(source);
        (EodService::new(source.clone()), source)
    }

    #[tokio::test]
    async fn test_keys_results_by_symbol_in_request_order() {
        let (service, source) = scripted_service(
            ScriptedSource::default()
                .with_rows("B.Y", vec![json!({"date": "2023-08-01"})])
                .with_rows("A.X", vec![json!({"date": "2023-08-02"}), json!({"date": "2023-08-03"})]),
        );

        let data = service
            .history(&[json!("B.Y"), json!("A.X")], Some("20230801"), Some("20230821"))
            .await
            .unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data[0].symbol.as_str(), "B.Y");
        assert_eq!(data[0].rows.as_array().unwrap().len(), 1);
        assert_eq!(data[1].symbol.as_str(), "A.X");
        assert_eq!(data[1].rows.as_array().unwrap().len(), 2);
        assert_eq!(source.calls(), vec!["B.Y", "A.X"]);
    }

    #[tokio::test]
    async fn test_passes_reformatted_range_in_ascending_order() {
        let (service, source) = scripted_service(ScriptedSource::default());
        service
            .history(&[json!("600519.SHG")], Some("20230801"), Some("20230821"))
            .await
            .unwrap();

        let queries = source.queries.lock().unwrap().clone();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].from.as_ref().map(TradeDate::iso), Some("2023-08-01"));
        assert_eq!(queries[0].to.as_ref().map(TradeDate::iso), Some("2023-08-21"));
        assert_eq!(queries[0].order, SortOrder::Ascending);
    }

    #[tokio::test]
    async fn test_first_failure_stops_remaining_fetches() {
        let (service, source) = scripted_service(
            ScriptedSource::default()
                .failing("A.X", 500)
                .with_rows("B.Y", vec![json!({"date": "2023-08-01"})]),
        );

        let err = service
            .history(&[json!("A.X"), json!("B.Y")], Some("20230801"), Some("20230821"))
            .await
            .unwrap_err();

        assert!(!err.is_client_error());
        assert_eq!(source.calls(), vec!["A.X"]);
    }

    #[tokio::test]
    async fn test_failure_after_success_discards_partial_results() {
        let (service, source) = scripted_service(
            ScriptedSource::default()
                .with_rows("A.X", vec![json!({"date": "2023-08-01"})])
                .failing("B.Y", 503)
                .with_rows("C.Z", vec![json!({"date": "2023-08-01"})]),
        );

        let result = service
            .history(
                &[json!("A.X"), json!("B.Y"), json!("C.Z")],
                Some("20230801"),
                Some("20230821"),
            )
            .await;

        assert!(result.is_err());
        assert_eq!(source.calls(), vec!["A.X", "B.Y"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetches_are_sequential() {
        let (service, _) = scripted_service(
            ScriptedSource::default()
                .delayed("A.X", Duration::from_millis(100))
                .delayed("B.Y", Duration::from_millis(100)),
        );

        let started = tokio::time::Instant::now();
        service
            .history(&[json!("A.X"), json!("B.Y")], Some("20230801"), Some("20230821"))
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_invalid_symbol_anywhere_rejects_before_fetching() {
        let (service, source) = scripted_service(ScriptedSource::default());

        let err = service
            .history(
                &[json!("A.X"), json!("B.Y"), json!("NOSEPARATOR")],
                Some("20230801"),
                Some("20230821"),
            )
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Invalid symbol format: NOSEPARATOR");
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_string_symbol_is_invalid() {
        let (service, source) = scripted_service(ScriptedSource::default());

        let err = service
            .history(&[json!(600519)], Some("20230801"), Some("20230821"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid symbol format: 600519");
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_validation_order() {
        let (service, source) = scripted_service(ScriptedSource::default());

        // Empty symbols wins over bad dates.
        let err = service.history(&[], None, Some("bad")).await.unwrap_err();
        assert_eq!(err.to_string(), "symbols must be a non-empty array");

        // Bad dates win over bad symbols.
        let err = service
            .history(&[json!("NOSEPARATOR")], Some("20230801"), Some("2023-08-21"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "start_date and end_date must be YYYYMMDD");

        let err = service
            .history(&[json!("A.X")], None, Some("20230821"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "start_date and end_date must be YYYYMMDD");

        assert!(source.calls().is_empty());
    }
}
