//! Structured logging initialization.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::error::{TelemetryError, TelemetryResult};

/// Crate-level targets that reach the log file at DEBUG.
const FILE_DEBUG_TARGETS: [&str; 4] = ["fapi", "fapi_core", "fapi_rest", "fapi_bot"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log destinations and levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append-only log file. Parent directories are created on demand.
    pub log_file: PathBuf,
    /// Console filter directive, used when `RUST_LOG` is unset.
    pub console_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("bot.log"),
            console_level: "info".to_string(),
        }
    }
}

/// Initialize console and file logging.
///
/// Console output is JSON when `RUST_ENV=production` and pretty otherwise.
/// The file receives plain text without ANSI colors.
pub fn init_logging(config: &LoggingConfig) -> TelemetryResult<()> {
    let is_production = std::env::var("RUST_ENV")
        .map(|v| v == "production")
        .unwrap_or(false);

    let console_filter = console_filter(&config.console_level)?;
    let console: BoxedLayer = if is_production {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(console_filter)
            .boxed()
    } else {
        fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_names(true)
            .with_filter(console_filter)
            .boxed()
    };

    let file = Arc::new(open_log_file(&config.log_file)?);
    let file_layer: BoxedLayer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file)
        .with_filter(file_filter())
        .boxed();

    tracing_subscriber::registry()
        .with(vec![console, file_layer])
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// `RUST_LOG` if set, else the configured directive.
fn console_filter(level: &str) -> TelemetryResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).map_err(|e| {
            TelemetryError::LoggingInit(format!("invalid console level {level:?}: {e}"))
        }),
    }
}

fn file_filter() -> Targets {
    FILE_DEBUG_TARGETS
        .iter()
        .fold(Targets::new().with_default(Level::INFO), |targets, target| {
            targets.with_target(*target, Level::DEBUG)
        })
}

fn open_log_file(path: &Path) -> TelemetryResult<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
