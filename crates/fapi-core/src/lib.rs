//! Core domain types for the futures order client.
//!
//! - `Price`, `Quantity`: precision-safe numerics with fixed-point wire form
//! - `OrderSide`, `OrderType`, `TimeInForce`: trading enums
//! - `OrderIntent` / `ValidOrder`: what the caller asks for, and what
//!   survived validation
//! - `Credentials`: API key and secret

pub mod credentials;
pub mod decimal;
pub mod error;
pub mod order;

pub use credentials::Credentials;
pub use decimal::{fixed_point, parse_decimal, Price, Quantity, MAX_SCALE, WIRE_MIN_SCALE};
pub use error::{CoreError, CoreResult};
pub use order::{OrderIntent, OrderKind, OrderSide, OrderType, TimeInForce, ValidOrder};
