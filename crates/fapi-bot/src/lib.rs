//! Command-line order placement for USDT-M futures.
//!
//! Parses a subcommand into an order intent, wires a signed order client
//! from configuration and renders the exchange response.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;

pub use app::{render_result, Application};
pub use cli::{resolve_credentials, Cli, Command};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
