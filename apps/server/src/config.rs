use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;
use eod_market_data::{provider::eodhd::DEFAULT_BASE_URL, DataSourceMode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Process configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Bearer credential every gated request must present. `None` makes
    /// every gated request fail with a server configuration error.
    pub auth_token: Option<String>,
    pub data_source: DataSourceMode,
    pub eodhd_api_token: Option<String>,
    pub eodhd_base_url: String,
    pub fixtures_dir: PathBuf,
    pub fetch_timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let listen_addr: SocketAddr = match non_empty("EOD_LISTEN_ADDR") {
            Some(addr) => addr
                .parse()
                .with_context(|| format!("Invalid EOD_LISTEN_ADDR: {addr}"))?,
            None => {
                let port: u16 = non_empty("PORT")
                    .unwrap_or_else(|| "3000".into())
                    .parse()
                    .context("Invalid PORT")?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };
        let timeout_ms: u64 = non_empty("FETCH_TIMEOUT")
            .unwrap_or_else(|| "60000".into())
            .parse()
            .unwrap_or(60000);
        let log_format = match non_empty("EOD_LOG_FORMAT") {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            auth_token: non_empty("PROXY_BEARER_TOKEN"),
            data_source: DataSourceMode::from_mock_flag(lookup("MOCK_MODE").as_deref()),
            eodhd_api_token: non_empty("EODHD_API_TOKEN"),
            eodhd_base_url: non_empty("EODHD_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            fixtures_dir: non_empty("EOD_FIXTURES_DIR")
                .unwrap_or_else(|| "fixtures".into())
                .into(),
            fetch_timeout: Duration::from_millis(timeout_ms),
            log_format,
        })
    }
}
