//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credentials: pass --{flag} or set {env_var}")]
    MissingCredentials {
        flag: &'static str,
        env_var: &'static str,
    },

    #[error("Invalid input: {0}")]
    Input(#[from] fapi_core::CoreError),

    #[error(transparent)]
    Trading(#[from] fapi_rest::TradingError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] fapi_telemetry::TelemetryError),
}

impl AppError {
    /// Short name of the error class, for the failure log line.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "ConfigError",
            Self::MissingCredentials { .. } => "MissingCredentials",
            Self::Input(_) => "ValidationError",
            Self::Trading(e) => e.kind(),
            Self::Telemetry(_) => "TelemetryError",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
