//! Environment-driven settings for the resume indexer.

use std::env;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use resume_indexer_repository::opensearch::DEFAULT_INDEX_NAME;
use resume_indexer_repository::{IndexConfig, WriteMode};
use resume_store_repository::StoreConfig;
use tracing::warn;

use crate::IndexingError;

/// Default search backend URL.
const DEFAULT_SEARCH_URL: &str = "http://localhost:9200";

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 8000;

/// Connection mode for the search backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if connection fails.
    FailFast,
    /// Retry connection until successful.
    Retry,
}

impl ConnectionMode {
    /// Parse a connection mode.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    /// Defaults to "retry" if not set or invalid.
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "retry".to_string())
            .to_lowercase()
            .as_str()
        {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!("Invalid SEARCH_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

/// All runtime settings of the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Record store connection settings.
    pub store: StoreConfig,
    /// Search backend URL.
    pub search_url: String,
    /// Basic auth for the search backend; set only when both user and password are.
    pub search_credentials: Option<(String, String)>,
    /// Search index name and write mode.
    pub index: IndexConfig,
    pub connection_mode: ConnectionMode,
    pub retry_interval: Duration,
    /// Address the HTTP server binds to.
    pub server_addr: SocketAddr,
}

impl AppConfig {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `DB_HOST` / `DB_PORT` / `DB_NAME`: record store location (default: localhost / 5432 / resumes)
    /// - `DB_USER` / `DB_PASSWORD`: record store credentials (default: postgres / postgres)
    /// - `DB_MAX_CONNECTIONS`: pool size (default: 10)
    /// - `ES_HOST`: search backend URL (default: http://localhost:9200)
    /// - `ES_USERNAME` / `ES_PASSWORD`: optional basic auth
    /// - `ES_INDEX`: index name (default: resumes)
    /// - `ES_WRITE_MODE`: "upsert" or "append" (default: upsert)
    /// - `SEARCH_CONNECTION_MODE`: "fail-fast" or "retry" (default: retry)
    /// - `SEARCH_RETRY_INTERVAL_SECS`: retry interval in seconds (default: 15)
    /// - `SERVER_HOST` / `SERVER_PORT`: bind host or IP and port (default: 0.0.0.0 / 8000)
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Read settings through `get`, which returns the value of a variable if set.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, IndexingError> {
        let defaults = StoreConfig::default();
        let store = StoreConfig {
            host: get("DB_HOST").unwrap_or(defaults.host),
            port: parse_or("DB_PORT", get("DB_PORT"), defaults.port)?,
            database: get("DB_NAME").unwrap_or(defaults.database),
            username: get("DB_USER").unwrap_or(defaults.username),
            password: get("DB_PASSWORD").unwrap_or(defaults.password),
            max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                get("DB_MAX_CONNECTIONS"),
                defaults.max_connections,
            )?,
            acquire_timeout: defaults.acquire_timeout,
        };

        let search_credentials = match (get("ES_USERNAME"), get("ES_PASSWORD")) {
            (Some(user), Some(password)) if !user.is_empty() => Some((user, password)),
            _ => None,
        };

        let write_mode = match get("ES_WRITE_MODE") {
            Some(value) => value
                .parse::<WriteMode>()
                .map_err(|e| IndexingError::config(format!("ES_WRITE_MODE: {}", e)))?,
            None => WriteMode::default(),
        };
        let index = IndexConfig::new(
            get("ES_INDEX").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            write_mode,
        );

        let retry_interval = get("SEARCH_RETRY_INTERVAL_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_INTERVAL_SECS);

        let server_host = get("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string());
        let server_port = parse_or("SERVER_PORT", get("SERVER_PORT"), DEFAULT_SERVER_PORT)?;
        let server_addr = resolve_server_addr(&server_host, server_port)?;

        Ok(Self {
            store,
            search_url: get("ES_HOST").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
            search_credentials,
            index,
            connection_mode: ConnectionMode::parse(get("SEARCH_CONNECTION_MODE")),
            retry_interval: Duration::from_secs(retry_interval),
            server_addr,
        })
    }
}

/// Resolve the bind address. `host` may be an IP literal or a hostname such as `localhost`.
fn resolve_server_addr(host: &str, port: u16) -> Result<SocketAddr, IndexingError> {
    let host = host.trim();
    let valid_name = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | ':' | '[' | ']'));
    if !valid_name {
        return Err(IndexingError::config(format!(
            "SERVER_HOST has an invalid value: {}",
            host
        )));
    }

    let host = host.trim_start_matches('[').trim_end_matches(']');
    (host, port)
        .to_socket_addrs()
        .map_err(|e| IndexingError::config(format!("Cannot resolve SERVER_HOST {}: {}", host, e)))?
        .next()
        .ok_or_else(|| IndexingError::config(format!("SERVER_HOST {} has no address", host)))
}

fn parse_or<T: std::str::FromStr>(
    key: &str,
    value: Option<String>,
    default: T,
) -> Result<T, IndexingError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| IndexingError::config(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}
