//! Order intent types and validation.
//!
//! An [`OrderIntent`] is what a caller asks for. [`OrderIntent::validate`]
//! turns it into a [`ValidOrder`] whose [`OrderKind`] carries exactly the
//! fields its order type needs, so downstream payload building never has to
//! deal with missing prices.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decimal::{Price, Quantity};
use crate::error::{CoreError, CoreResult};

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderSide {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            _ => Err(CoreError::InvalidSide(s.to_string())),
        }
    }
}

/// Order type as requested by the caller.
///
/// This is the logical type; the payload builder decides which wire `type`
/// each variant maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
    StopLimit,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
            Self::StopLimit => "STOP_LIMIT",
        }
    }

    pub fn requires_price(&self) -> bool {
        matches!(self, Self::Limit | Self::StopLimit)
    }

    pub fn requires_stop_price(&self) -> bool {
        matches!(self, Self::StopLimit)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-in-force for resting orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good-till-cancel.
    #[default]
    Gtc,
    /// Immediate-or-cancel.
    Ioc,
    /// Fill-or-kill.
    Fok,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gtc => "GTC",
            Self::Ioc => "IOC",
            Self::Fok => "FOK",
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeInForce {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GTC" => Ok(Self::Gtc),
            "IOC" => Ok(Self::Ioc),
            "FOK" => Ok(Self::Fok),
            _ => Err(CoreError::InvalidTimeInForce(s.to_string())),
        }
    }
}

/// A caller's request to place one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Quantity,
    pub price: Option<Price>,
    pub stop_price: Option<Price>,
    #[serde(default)]
    pub time_in_force: TimeInForce,
    #[serde(default)]
    pub reduce_only: bool,
}

impl OrderIntent {
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: Quantity) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            stop_price: None,
            time_in_force: TimeInForce::default(),
            reduce_only: false,
        }
    }

    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        Self {
            order_type: OrderType::Limit,
            price: Some(price),
            ..Self::market(symbol, side, quantity)
        }
    }

    pub fn stop_limit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: Quantity,
        stop_price: Price,
        price: Price,
    ) -> Self {
        Self {
            order_type: OrderType::StopLimit,
            price: Some(price),
            stop_price: Some(stop_price),
            ..Self::market(symbol, side, quantity)
        }
    }

    #[must_use]
    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    #[must_use]
    pub fn with_reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }

    /// Check every local precondition and produce a [`ValidOrder`].
    ///
    /// # Errors
    /// - `InvalidSymbol` for an empty or non-alphanumeric symbol
    /// - `NonPositive` for quantity, price or stop price <= 0
    /// - `MissingField` when the order type needs a price or stop price
    /// - `UnexpectedField` when a price is given to a type that ignores it
    pub fn validate(&self) -> CoreResult<ValidOrder> {
        let symbol = self.symbol.trim().to_ascii_uppercase();
        if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidSymbol(self.symbol.clone()));
        }

        if !self.quantity.is_positive() {
            return Err(CoreError::NonPositive {
                field: "quantity",
                value: self.quantity.to_string(),
            });
        }

        let type_name = self.order_type.as_str();
        let price = checked_price(
            "price",
            self.price,
            self.order_type.requires_price(),
            type_name,
        )?;
        let stop_price = checked_price(
            "stopPrice",
            self.stop_price,
            self.order_type.requires_stop_price(),
            type_name,
        )?;

        let missing = |field| CoreError::MissingField {
            field,
            order_type: type_name,
        };
        let kind = match self.order_type {
            OrderType::Market => OrderKind::Market,
            OrderType::Limit => OrderKind::Limit {
                price: price.ok_or_else(|| missing("price"))?,
                time_in_force: self.time_in_force,
            },
            OrderType::StopLimit => OrderKind::StopLimit {
                stop_price: stop_price.ok_or_else(|| missing("stopPrice"))?,
                price: price.ok_or_else(|| missing("price"))?,
                time_in_force: self.time_in_force,
            },
        };

        Ok(ValidOrder {
            symbol,
            side: self.side,
            quantity: self.quantity,
            kind,
            reduce_only: self.reduce_only,
        })
    }
}

fn checked_price(
    field: &'static str,
    value: Option<Price>,
    required: bool,
    order_type: &'static str,
) -> CoreResult<Option<Price>> {
    match (value, required) {
        (None, true) => Err(CoreError::MissingField { field, order_type }),
        (Some(_), false) => Err(CoreError::UnexpectedField { field, order_type }),
        (Some(price), true) if !price.is_positive() => Err(CoreError::NonPositive {
            field,
            value: price.to_string(),
        }),
        (value, _) => Ok(value),
    }
}

/// Per-type fields of a validated order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    Market,
    Limit {
        price: Price,
        time_in_force: TimeInForce,
    },
    StopLimit {
        stop_price: Price,
        price: Price,
        time_in_force: TimeInForce,
    },
}

impl OrderKind {
    pub fn order_type(&self) -> OrderType {
        match self {
            Self::Market => OrderType::Market,
            Self::Limit { .. } => OrderType::Limit,
            Self::StopLimit { .. } => OrderType::StopLimit,
        }
    }
}

/// An order that passed [`OrderIntent::validate`]. Symbol is uppercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidOrder {
    pub symbol: String,
    pub side: OrderSide,
    pub quantity: Quantity,
    pub kind: OrderKind,
    pub reduce_only: bool,
}
