//! Application wiring and result rendering.

use std::fmt::Write as _;

use fapi_core::{Credentials, OrderIntent};
use fapi_rest::{OrderResult, OrderTransport, SignedTransport, TradingClient};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::AppResult;

const RESULT_HEADER: &str = "--- ORDER RESULT ---";
const RESULT_FOOTER: &str = "--------------------";

/// Order client built from configuration.
pub struct Application<T = SignedTransport> {
    client: TradingClient<T>,
}

impl Application<SignedTransport> {
    /// Order client over a [`SignedTransport`] configured from `config`.
    ///
    /// Performs no network I/O.
    pub fn new(config: &AppConfig, credentials: &Credentials) -> AppResult<Self> {
        let client = TradingClient::connect(credentials, config.transport_config())?
            .with_payload_builder(config.payload_builder());
        debug!(transport = ?client.transport(), "Transport ready");
        Ok(Self::with_client(client))
    }
}

impl<T: OrderTransport> Application<T> {
    pub fn with_client(client: TradingClient<T>) -> Self {
        Self { client }
    }

    /// Place one order and log the response.
    pub async fn place(&self, intent: &OrderIntent) -> AppResult<OrderResult> {
        let result = self.client.place_order(intent).await?;
        info!(
            order_id = ?result.get("orderId"),
            status = ?result.get("status"),
            "Order accepted"
        );
        Ok(result)
    }
}

/// Human-readable block: header, one `key: value` line per field in server
/// order, closing rule.
pub fn render_result(result: &OrderResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RESULT_HEADER}");
    for (key, value) in result.iter() {
        let _ = writeln!(out, "{key}: {}", render_value(value));
    }
    let _ = writeln!(out, "{RESULT_FOOTER}");
    out
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fapi_core::{OrderSide, Quantity};
    use fapi_rest::{BoxFuture, HttpMethod, ParamMap, TradingError, TradingResult};
    use parking_lot::Mutex;
    use rust_decimal_macros::dec;
    use serde_json::{json, Map};

    struct RecordingTransport {
        payloads: Mutex<Vec<ParamMap>>,
        response: Map<String, Value>,
    }

    impl RecordingTransport {
        fn new(response: Value) -> Self {
            let response = match response {
                Value::Object(fields) => fields,
                _ => Map::new(),
            };
            Self {
                payloads: Mutex::new(Vec::new()),
                response,
            }
        }
    }

    impl OrderTransport for RecordingTransport {
        fn send<'a>(
            &'a self,
            _method: HttpMethod,
            _path: &'a str,
            payload: ParamMap,
        ) -> BoxFuture<'a, TradingResult<OrderResult>> {
            self.payloads.lock().push(payload);
            let result = Ok(OrderResult::new(self.response.clone()));
            Box::pin(std::future::ready(result))
        }
    }

    #[test]
    fn test_render_result_keeps_server_order() {
        let result = match json!({
            "orderId": 4052271091u64,
            "symbol": "BTCUSDT",
            "status": "NEW",
            "reduceOnly": false,
            "stopPrice": "0",
            "clientOrderId": null
        }) {
            Value::Object(fields) => OrderResult::new(fields),
            _ => unreachable!(),
        };

        assert_eq!(
            render_result(&result),
            "--- ORDER RESULT ---\n\
             orderId: 4052271091\n\
             symbol: BTCUSDT\n\
             status: NEW\n\
             reduceOnly: false\n\
             stopPrice: 0\n\
             clientOrderId: None\n\
             --------------------\n"
        );
    }

    #[test]
    fn test_render_empty_result() {
        assert_eq!(
            render_result(&OrderResult::default()),
            "--- ORDER RESULT ---\n--------------------\n"
        );
    }

    #[tokio::test]
    async fn test_place_forwards_intent() {
        let app = Application::with_client(TradingClient::new(RecordingTransport::new(
            json!({ "orderId": 7, "status": "NEW" }),
        )));

        let intent = OrderIntent::market("btcusdt", OrderSide::Sell, Quantity::new(dec!(2)))
            .with_reduce_only(true);
        let result = app.place(&intent).await.unwrap();

        assert_eq!(result.get("orderId"), Some(&json!(7)));
        let payloads = app.client.transport().payloads.lock();
        assert_eq!(
            payloads[0].encode(),
            "symbol=BTCUSDT&side=SELL&type=MARKET&quantity=2.000000&reduceOnly=true"
        );
    }

    #[tokio::test]
    async fn test_validation_error_surfaces_as_trading_error() {
        let app = Application::with_client(TradingClient::new(RecordingTransport::new(json!({}))));
        let intent = OrderIntent::market("BTC-USDT", OrderSide::Buy, Quantity::new(dec!(1)));

        let err = app.place(&intent).await.unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
        assert!(matches!(
            err,
            crate::AppError::Trading(TradingError::Validation(_))
        ));
        assert!(app.client.transport().payloads.lock().is_empty());
    }

    #[test]
    fn test_new_performs_no_io() {
        let config = AppConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..AppConfig::default()
        };
        let credentials = Credentials::new("key", "secret").unwrap();
        assert!(Application::new(&config, &credentials).is_ok());

        let bad = AppConfig {
            base_url: "::not a url".to_string(),
            ..AppConfig::default()
        };
        let err = Application::new(&bad, &credentials).err().unwrap();
        assert_eq!(err.kind(), "InvalidConfig");
    }
}
