use std::sync::Arc;

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use eod_market_data::{Record, SymbolHistory};
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Serialize)]
struct BulkSnapshotResponse {
    ok: bool,
    count: usize,
    items: Vec<Record>,
}

#[derive(Serialize)]
struct HistoryResponse {
    ok: bool,
    data: Vec<SymbolHistory>,
}

/// Bodies are parsed loosely: field types are checked by the service so the
/// validation messages stay the same whatever shape the caller sent.
fn parse_body(body: &Bytes) -> ApiResult<Value> {
    serde_json::from_slice(body).map_err(|_| ApiError::BadRequest("Invalid JSON".to_string()))
}

fn str_field<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(Value::as_str)
}

async fn bulk_snapshot(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<BulkSnapshotResponse>> {
    let payload = parse_body(&body)?;
    let snapshot = state
        .eod_service
        .bulk_snapshot(str_field(&payload, "trade_date"))
        .await?;
    Ok(Json(BulkSnapshotResponse {
        ok: true,
        count: snapshot.count,
        items: snapshot.items,
    }))
}

async fn history(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<HistoryResponse>> {
    let payload = parse_body(&body)?;
    let symbols = payload
        .get("symbols")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let data = state
        .eod_service
        .history(
            symbols,
            str_field(&payload, "start_date"),
            str_field(&payload, "end_date"),
        )
        .await?;
    Ok(Json(HistoryResponse { ok: true, data }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/eod/bulk-snapshot", post(bulk_snapshot))
        .route("/eod/history", post(history))
}
