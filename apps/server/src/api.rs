mod eod;
mod health;

use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{auth::require_bearer, error::ApiError, main_lib::AppState};

async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new().merge(health::router()).merge(eod::router());

    // The bearer check wraps the fallback too, so unknown paths answer 401
    // before they answer 404.
    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .with_state(state)
        // Set must wrap Propagate so the generated id reaches the response.
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
}
