//! Order payload construction.
//!
//! The only place that knows how an order type maps onto wire fields:
//!
//! | order type | fields (in order) |
//! |---|---|
//! | MARKET | symbol, side, type=MARKET, quantity, reduceOnly |
//! | LIMIT | symbol, side, type=LIMIT, timeInForce, quantity, price, reduceOnly |
//! | STOP_LIMIT | symbol, side, type=STOP, quantity, stopPrice, price, timeInForce, reduceOnly |
//!
//! The wire `type` for stop-limit orders is configurable; `STOP` with both
//! `price` and `stopPrice` is the default.

use fapi_core::{OrderIntent, OrderKind, ValidOrder};

use crate::error::TradingResult;
use crate::params::ParamMap;

/// Default wire `type` for stop-limit orders.
pub const DEFAULT_STOP_LIMIT_TYPE: &str = "STOP";

/// Maps validated orders onto exchange parameters.
#[derive(Debug, Clone)]
pub struct OrderPayloadBuilder {
    stop_limit_type: String,
}

impl Default for OrderPayloadBuilder {
    fn default() -> Self {
        Self {
            stop_limit_type: DEFAULT_STOP_LIMIT_TYPE.to_string(),
        }
    }
}

impl OrderPayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the wire `type` sent for stop-limit orders.
    #[must_use]
    pub fn with_stop_limit_type(mut self, wire_type: impl Into<String>) -> Self {
        self.stop_limit_type = wire_type.into().trim().to_ascii_uppercase();
        self
    }

    pub fn stop_limit_type(&self) -> &str {
        &self.stop_limit_type
    }

    /// Validate `intent`, then build its parameters.
    pub fn build_intent(&self, intent: &OrderIntent) -> TradingResult<ParamMap> {
        let order = intent.validate()?;
        Ok(self.build(&order))
    }

    pub fn build(&self, order: &ValidOrder) -> ParamMap {
        let mut params = ParamMap::new();
        params.insert("symbol", order.symbol.to_ascii_uppercase());
        params.insert("side", order.side.as_str());

        match order.kind {
            OrderKind::Market => {
                params.insert("type", "MARKET");
                params.insert("quantity", order.quantity.to_wire());
            }
            OrderKind::Limit {
                price,
                time_in_force,
            } => {
                params.insert("type", "LIMIT");
                params.insert("timeInForce", time_in_force.as_str());
                params.insert("quantity", order.quantity.to_wire());
                params.insert("price", price.to_wire());
            }
            OrderKind::StopLimit {
                stop_price,
                price,
                time_in_force,
            } => {
                params.insert("type", self.stop_limit_type.as_str());
                params.insert("quantity", order.quantity.to_wire());
                params.insert("stopPrice", stop_price.to_wire());
                params.insert("price", price.to_wire());
                params.insert("timeInForce", time_in_force.as_str());
            }
        }

        params.insert("reduceOnly", if order.reduce_only { "true" } else { "false" });
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TradingError;
    use fapi_core::{CoreError, OrderSide, Price, Quantity, TimeInForce};
    use rust_decimal_macros::dec;

    fn keys(params: &ParamMap) -> Vec<&str> {
        params.keys().collect()
    }

    #[test]
    fn test_market_fields() {
        let intent = OrderIntent::market("btcusdt", OrderSide::Buy, Quantity::new(dec!(0.001)));
        let params = OrderPayloadBuilder::new().build_intent(&intent).unwrap();

        assert_eq!(
            keys(&params),
            vec!["symbol", "side", "type", "quantity", "reduceOnly"]
        );
        assert_eq!(
            params.encode(),
            "symbol=BTCUSDT&side=BUY&type=MARKET&quantity=0.001000&reduceOnly=false"
        );
    }

    #[test]
    fn test_limit_fields_and_fixed_point() {
        let intent = OrderIntent::limit(
            "ETHUSDT",
            OrderSide::Sell,
            Quantity::new(dec!(0.0010)),
            Price::new(dec!(1850.5)),
        );
        let params = OrderPayloadBuilder::new().build_intent(&intent).unwrap();

        assert_eq!(
            keys(&params),
            vec![
                "symbol",
                "side",
                "type",
                "timeInForce",
                "quantity",
                "price",
                "reduceOnly"
            ]
        );
        assert_eq!(params.get_str("timeInForce"), Some("GTC"));
        assert_eq!(params.get_str("quantity"), Some("0.001000"));
        assert_eq!(params.get_str("price"), Some("1850.500000"));
        assert!(!params.encode().contains("e-"));
    }

    #[test]
    fn test_stop_limit_fields() {
        let intent = OrderIntent::stop_limit(
            "BTCUSDT",
            OrderSide::Sell,
            Quantity::new(dec!(0.01)),
            Price::new(dec!(25000)),
            Price::new(dec!(24950)),
        )
        .with_time_in_force(TimeInForce::Ioc)
        .with_reduce_only(true);
        let params = OrderPayloadBuilder::new().build_intent(&intent).unwrap();

        assert_eq!(
            params.encode(),
            "symbol=BTCUSDT&side=SELL&type=STOP&quantity=0.010000&stopPrice=25000.000000\
             &price=24950.000000&timeInForce=IOC&reduceOnly=true"
        );
    }

    #[test]
    fn test_stop_limit_type_configurable() {
        let builder = OrderPayloadBuilder::new().with_stop_limit_type("stop_loss_limit");
        assert_eq!(builder.stop_limit_type(), "STOP_LOSS_LIMIT");

        let intent = OrderIntent::stop_limit(
            "BTCUSDT",
            OrderSide::Buy,
            Quantity::new(dec!(1)),
            Price::new(dec!(2)),
            Price::new(dec!(3)),
        );
        let params = builder.build_intent(&intent).unwrap();
        assert_eq!(params.get_str("type"), Some("STOP_LOSS_LIMIT"));
    }

    #[test]
    fn test_invalid_intent_is_validation_error() {
        let mut intent = OrderIntent::limit(
            "BTCUSDT",
            OrderSide::Buy,
            Quantity::new(dec!(1)),
            Price::new(dec!(1)),
        );
        intent.price = None;

        let err = OrderPayloadBuilder::new().build_intent(&intent).unwrap_err();
        assert!(matches!(
            err,
            TradingError::Validation(CoreError::MissingField { field: "price", .. })
        ));
    }

    #[test]
    fn test_build_is_idempotent() {
        let intent = OrderIntent::limit(
            "BTCUSDT",
            OrderSide::Buy,
            Quantity::new(dec!(0.5)),
            Price::new(dec!(27000.1)),
        );
        let builder = OrderPayloadBuilder::new();
        assert_eq!(
            builder.build_intent(&intent).unwrap().encode(),
            builder.build_intent(&intent).unwrap().encode()
        );
    }
}
