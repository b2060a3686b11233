//! fapi-bot - Entry Point
//!
//! Places one MARKET, LIMIT or STOP_LIMIT order and prints the response.

use anyhow::Result;
use clap::Parser;
use fapi_bot::{render_result, resolve_credentials, AppConfig, Application, Cli};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config path: CLI arg > FAPI_BOT_CONFIG env var > config/default.toml > defaults
    let config = AppConfig::load(cli.config.clone())?;

    fapi_telemetry::init_logging(&config.logging)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.base_url,
        "Starting fapi-bot"
    );

    // Checked before any network activity
    let credentials = match resolve_credentials(cli.api_key, cli.api_secret) {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(kind = e.kind(), error = %e, "API credentials required");
            return Err(e.into());
        }
    };

    let app = Application::new(&config, &credentials)?;
    let intent = cli.command.into_intent();

    match app.place(&intent).await {
        Ok(result) => {
            println!();
            print!("{}", render_result(&result));
            println!();
            Ok(())
        }
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Failed to place order");
            Err(e.into())
        }
    }
}
