//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fapi_core::{Credentials, OrderIntent, OrderSide, Price, Quantity, TimeInForce};

use crate::error::{AppError, AppResult};

pub const API_KEY_ENV: &str = "BINANCE_API_KEY";
pub const API_SECRET_ENV: &str = "BINANCE_API_SECRET";

/// Place orders on the USDT-M futures testnet.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// API key (can also be set via BINANCE_API_KEY env var)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API secret (can also be set via BINANCE_API_SECRET env var)
    #[arg(long, global = true)]
    pub api_secret: Option<String>,

    /// Configuration file path (can also be set via FAPI_BOT_CONFIG env var)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Market order
    Market {
        #[command(flatten)]
        order: OrderArgs,
    },
    /// Limit order
    Limit {
        #[command(flatten)]
        order: OrderArgs,

        /// Limit price
        #[arg(long, value_parser = parse_price)]
        price: Price,

        /// GTC, IOC or FOK (default GTC)
        #[arg(long, value_parser = parse_time_in_force)]
        time_in_force: Option<TimeInForce>,
    },
    /// Stop-limit order
    #[command(alias = "stop_limit")]
    StopLimit {
        #[command(flatten)]
        order: OrderArgs,

        /// Trigger price
        #[arg(long, value_parser = parse_price)]
        stop_price: Price,

        /// Limit price once triggered
        #[arg(long, value_parser = parse_price)]
        price: Price,

        /// GTC, IOC or FOK (default GTC)
        #[arg(long, value_parser = parse_time_in_force)]
        time_in_force: Option<TimeInForce>,
    },
}

/// Fields shared by every order subcommand.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct OrderArgs {
    /// Trading pair, e.g. BTCUSDT
    #[arg(long)]
    pub symbol: String,

    /// BUY or SELL (case-insensitive)
    #[arg(long, value_parser = parse_side)]
    pub side: OrderSide,

    /// Order quantity
    #[arg(long, value_parser = parse_quantity)]
    pub quantity: Quantity,

    /// Only reduce an existing position
    #[arg(long)]
    pub reduce_only: bool,
}

impl Command {
    pub fn into_intent(self) -> OrderIntent {
        match self {
            Self::Market { order } => {
                OrderIntent::market(order.symbol, order.side, order.quantity)
                    .with_reduce_only(order.reduce_only)
            }
            Self::Limit {
                order,
                price,
                time_in_force,
            } => OrderIntent::limit(order.symbol, order.side, order.quantity, price)
                .with_time_in_force(time_in_force.unwrap_or_default())
                .with_reduce_only(order.reduce_only),
            Self::StopLimit {
                order,
                stop_price,
                price,
                time_in_force,
            } => {
                OrderIntent::stop_limit(order.symbol, order.side, order.quantity, stop_price, price)
                    .with_time_in_force(time_in_force.unwrap_or_default())
                    .with_reduce_only(order.reduce_only)
            }
        }
    }
}

/// Credentials from flags, falling back to the environment.
pub fn resolve_credentials(
    api_key: Option<String>,
    api_secret: Option<String>,
) -> AppResult<Credentials> {
    credentials_from(api_key, api_secret, |name| std::env::var(name).ok())
}

fn credentials_from(
    api_key: Option<String>,
    api_secret: Option<String>,
    env: impl Fn(&str) -> Option<String>,
) -> AppResult<Credentials> {
    let present = |v: &String| !v.trim().is_empty();

    let key = api_key
        .filter(present)
        .or_else(|| env(API_KEY_ENV).filter(present))
        .ok_or(AppError::MissingCredentials {
            flag: "api-key",
            env_var: API_KEY_ENV,
        })?;
    let secret = api_secret
        .filter(present)
        .or_else(|| env(API_SECRET_ENV).filter(present))
        .ok_or(AppError::MissingCredentials {
            flag: "api-secret",
            env_var: API_SECRET_ENV,
        })?;

    // The secret is opaque: only emptiness is judged on its trimmed form.
    Ok(Credentials::new(key.trim(), secret)?)
}

pub fn parse_side(s: &str) -> Result<OrderSide, String> {
    s.parse().map_err(|e: fapi_core::CoreError| e.to_string())
}

pub fn parse_time_in_force(s: &str) -> Result<TimeInForce, String> {
    s.parse().map_err(|e: fapi_core::CoreError| e.to_string())
}

pub fn parse_quantity(s: &str) -> Result<Quantity, String> {
    let quantity: Quantity = s.parse().map_err(|e: fapi_core::CoreError| e.to_string())?;
    if !quantity.is_positive() {
        return Err(format!("must be > 0, got {s}"));
    }
    Ok(quantity)
}

pub fn parse_price(s: &str) -> Result<Price, String> {
    let price: Price = s.parse().map_err(|e: fapi_core::CoreError| e.to_string())?;
    if !price.is_positive() {
        return Err(format!("must be > 0, got {s}"));
    }
    Ok(price)
}
