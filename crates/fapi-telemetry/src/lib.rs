//! Structured logging for the futures order client.
//!
//! Console output filtered by `RUST_LOG` or the configured level, plus an
//! append-only log file that keeps the `fapi::audit` trail at DEBUG.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{init_logging, LoggingConfig};
