//! Application configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use fapi_rest::endpoints::TESTNET_BASE_URL;
use fapi_rest::{OrderPayloadBuilder, TransportConfig, DEFAULT_STOP_LIMIT_TYPE};
use fapi_telemetry::LoggingConfig;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FAPI_BOT_CONFIG";

/// Config file used when neither `--config` nor the env var is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Top-level configuration, loaded from TOML. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
    /// Fetch `serverTime` before each signed request.
    pub sync_server_time: bool,
    pub time_sync_timeout_ms: u64,
    /// Wire `type` for stop-limit orders ("STOP" on USDT-M futures).
    pub stop_limit_order_type: String,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: TESTNET_BASE_URL.to_string(),
            request_timeout_ms: 10_000,
            sync_server_time: true,
            time_sync_timeout_ms: 5_000,
            stop_limit_order_type: DEFAULT_STOP_LIMIT_TYPE.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve and load: explicit path, then `FAPI_BOT_CONFIG`, then
    /// `config/default.toml` if it exists, else built-in defaults.
    ///
    /// An explicitly named file that cannot be read is an error.
    pub fn load(explicit: Option<PathBuf>) -> AppResult<Self> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match resolve_path(explicit, env_path, Path::new(DEFAULT_CONFIG_PATH)) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> AppResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(AppError::Config("base_url must not be empty".to_string()));
        }
        if self.request_timeout_ms == 0 {
            return Err(AppError::Config("request_timeout_ms must be > 0".to_string()));
        }
        if self.sync_server_time && self.time_sync_timeout_ms == 0 {
            return Err(AppError::Config("time_sync_timeout_ms must be > 0".to_string()));
        }
        if self.stop_limit_order_type.trim().is_empty() {
            return Err(AppError::Config(
                "stop_limit_order_type must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout(),
            sync_server_time: self.sync_server_time,
            time_sync_timeout: self.time_sync_timeout(),
        }
    }

    pub fn payload_builder(&self) -> OrderPayloadBuilder {
        OrderPayloadBuilder::new().with_stop_limit_type(self.stop_limit_order_type.trim())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn time_sync_timeout(&self) -> Duration {
        Duration::from_millis(self.time_sync_timeout_ms)
    }
}

fn resolve_path(
    explicit: Option<PathBuf>,
    from_env: Option<PathBuf>,
    default: &Path,
) -> Option<PathBuf> {
    explicit
        .or(from_env)
        .or_else(|| default.exists().then(|| default.to_path_buf()))
}
