//! Signed REST order client for USDT-M futures.
//!
//! Flow for one order:
//! 1. [`TradingClient`] validates the intent
//! 2. [`OrderPayloadBuilder`] maps it to ordered parameters
//! 3. [`SignedTransport`] gets a timestamp from a [`TimeSource`], has the
//!    [`RequestSigner`] append `timestamp` and `signature`, sends it once,
//!    and classifies the outcome into [`OrderResult`] or [`TradingError`]
//!
//! Requests and responses are reported to an injected [`AuditLog`].

pub mod audit;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod params;
pub mod payload;
pub mod signer;
pub mod time;
pub mod transport;

pub use audit::{AuditEvent, AuditLog, MemoryAuditLog, TracingAuditLog, AUDIT_TARGET};
pub use client::TradingClient;
pub use error::{RejectBody, TradingError, TradingResult};
pub use params::{ParamMap, ParamValue};
pub use payload::{OrderPayloadBuilder, DEFAULT_STOP_LIMIT_TYPE};
pub use signer::{RequestSigner, SignedRequest};
pub use time::{local_now_ms, FixedTime, LocalClock, ServerTimeSource, TimeSource};
pub use transport::{
    build_client, BoxFuture, HttpMethod, OrderResult, OrderTransport, SignedTransport,
    TransportConfig,
};
