//! Error types for fapi-core.

use thiserror::Error;

/// Local precondition failures, raised before anything touches the network.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("{field} is required for {order_type} orders")]
    MissingField {
        field: &'static str,
        order_type: &'static str,
    },

    #[error("{field} must be > 0, got {value}")]
    NonPositive { field: &'static str, value: String },

    #[error("{field} is not accepted for {order_type} orders")]
    UnexpectedField {
        field: &'static str,
        order_type: &'static str,
    },

    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("side must be BUY or SELL, got {0:?}")]
    InvalidSide(String),

    #[error("time in force must be GTC, IOC or FOK, got {0:?}")]
    InvalidTimeInForce(String),

    #[error("must be a number, got {0:?}")]
    InvalidDecimal(String),

    #[error("{value:?} has more than {max_scale} decimal places")]
    TooPrecise { value: String, max_scale: u32 },

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(&'static str),
}

/// Result type alias for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
