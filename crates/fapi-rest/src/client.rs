//! Order placement facade.

use fapi_core::{Credentials, OrderIntent, OrderSide, Price, Quantity, TimeInForce};
use tracing::info;

use crate::endpoints;
use crate::error::TradingResult;
use crate::payload::OrderPayloadBuilder;
use crate::transport::{
    HttpMethod, OrderResult, OrderTransport, SignedTransport, TransportConfig,
};

/// One operation per order type over an [`OrderTransport`].
///
/// Every call validates before touching the transport and is a single
/// request/response exchange. Errors come back unchanged.
#[derive(Debug)]
pub struct TradingClient<T = SignedTransport> {
    transport: T,
    builder: OrderPayloadBuilder,
}

impl TradingClient<SignedTransport> {
    /// Client over a [`SignedTransport`] with default collaborators.
    pub fn connect(credentials: &Credentials, config: TransportConfig) -> TradingResult<Self> {
        Ok(Self::new(SignedTransport::new(credentials, config)?))
    }
}

impl<T: OrderTransport> TradingClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            builder: OrderPayloadBuilder::default(),
        }
    }

    #[must_use]
    pub fn with_payload_builder(mut self, builder: OrderPayloadBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn place_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Quantity,
    ) -> TradingResult<OrderResult> {
        self.place_order(&OrderIntent::market(symbol, side, quantity))
            .await
    }

    pub async fn place_limit_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Quantity,
        price: Price,
        time_in_force: Option<TimeInForce>,
    ) -> TradingResult<OrderResult> {
        let intent = OrderIntent::limit(symbol, side, quantity, price)
            .with_time_in_force(time_in_force.unwrap_or_default());
        self.place_order(&intent).await
    }

    pub async fn place_stop_limit_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Quantity,
        stop_price: Price,
        price: Price,
        time_in_force: Option<TimeInForce>,
    ) -> TradingResult<OrderResult> {
        let intent = OrderIntent::stop_limit(symbol, side, quantity, stop_price, price)
            .with_time_in_force(time_in_force.unwrap_or_default());
        self.place_order(&intent).await
    }

    /// Validate, build and submit any intent.
    pub async fn place_order(&self, intent: &OrderIntent) -> TradingResult<OrderResult> {
        let params = self.builder.build_intent(intent)?;

        info!(
            order_type = %intent.order_type,
            side = %intent.side,
            symbol = %intent.symbol,
            quantity = %intent.quantity,
            price = ?intent.price.map(|p| p.to_string()),
            stop_price = ?intent.stop_price.map(|p| p.to_string()),
            "Placing order"
        );

        self.transport
            .send(HttpMethod::Post, endpoints::ORDER, params)
            .await
    }
}
