use std::sync::Arc;

use eod_market_data::{DataSourceMode, EodDataSource, EodService, EodhdProvider, FixtureProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    auth::AuthManager,
    config::{Config, LogFormat},
};

pub struct AppState {
    pub eod_service: EodService,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

/// Pick the process-wide data source. The choice never changes afterwards.
pub fn build_data_source(config: &Config) -> Arc<dyn EodDataSource> {
    match config.data_source {
        DataSourceMode::Simulated => {
            tracing::info!(
                "Simulated mode: serving fixtures from {}",
                config.fixtures_dir.display()
            );
            Arc::new(FixtureProvider::new(config.fixtures_dir.clone()))
        }
        DataSourceMode::Live => {
            if config.eodhd_api_token.is_none() {
                tracing::warn!("EODHD_API_TOKEN is not set; upstream requests will fail");
            }
            tracing::info!("Live mode: proxying {}", config.eodhd_base_url);
            Arc::new(EodhdProvider::with_options(
                config.eodhd_base_url.clone(),
                config.eodhd_api_token.clone(),
                config.fetch_timeout,
            ))
        }
    }
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    let auth = AuthManager::new(config.auth_token.clone());
    if !auth.is_configured() {
        tracing::error!("PROXY_BEARER_TOKEN is not set; gated routes will answer 500");
    }

    let eod_service = EodService::new(build_data_source(config));
    tracing::info!("EOD data source: {}", eod_service.source_id());

    Arc::new(AppState {
        eod_service,
        auth: Arc::new(auth),
    })
}
