//! Signed HTTPS transport.
//!
//! Per call: fetch a timestamp, sign, encode, send once, classify the
//! outcome. There are no retries: resubmitting an order is the caller's
//! decision, since a blind retry can place the same order twice.

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use fapi_core::Credentials;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::{Map, Value};

use crate::audit::{AuditEvent, AuditLog, TracingAuditLog};
use crate::endpoints;
use crate::error::{RejectBody, TradingError, TradingResult};
use crate::params::ParamMap;
use crate::signer::{RequestSigner, SignedRequest};
use crate::time::{LocalClock, ServerTimeSource, TimeSource, DEFAULT_TIME_TIMEOUT};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP methods the signed endpoints use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }

    /// Whether parameters travel in the body (otherwise the query string).
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Delete)
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful response object, in server field order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderResult(Map<String, Value>);

impl OrderResult {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

}

/// Sends a payload as a signed request.
///
/// This is the seam between the order client and the network; tests swap
/// in a recording stub.
pub trait OrderTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        method: HttpMethod,
        path: &'a str,
        payload: ParamMap,
    ) -> BoxFuture<'a, TradingResult<OrderResult>>;
}

/// Settings for [`SignedTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    /// Stamp requests with the exchange clock instead of the local one.
    pub sync_server_time: bool,
    pub time_sync_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: endpoints::TESTNET_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            sync_server_time: true,
            time_sync_timeout: DEFAULT_TIME_TIMEOUT,
        }
    }
}

/// HMAC-signed HTTPS transport.
///
/// Owns a reusable connection pool; `&self` methods only, so one instance
/// can serve concurrent callers.
pub struct SignedTransport {
    client: Client,
    base_url: String,
    api_key: HeaderValue,
    signer: RequestSigner,
    time: Arc<dyn TimeSource>,
    audit: Arc<dyn AuditLog>,
    request_timeout: Duration,
}

impl SignedTransport {
    /// Transport with `tracing` for the audit log and the exchange clock
    /// (or the local clock when `sync_server_time` is off). No network I/O.
    pub fn new(credentials: &Credentials, config: TransportConfig) -> TradingResult<Self> {
        let client = build_client(config.request_timeout)?;
        let audit: Arc<dyn AuditLog> = Arc::new(TracingAuditLog);
        let time: Arc<dyn TimeSource> = if config.sync_server_time {
            Arc::new(
                ServerTimeSource::new(client.clone(), &config.base_url, Arc::clone(&audit))
                    .with_timeout(config.time_sync_timeout),
            )
        } else {
            Arc::new(LocalClock)
        };
        Self::with_parts(credentials, config, client, time, audit)
    }

    /// Transport with every collaborator supplied by the caller.
    pub fn with_parts(
        credentials: &Credentials,
        config: TransportConfig,
        client: Client,
        time: Arc<dyn TimeSource>,
        audit: Arc<dyn AuditLog>,
    ) -> TradingResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| {
            TradingError::InvalidConfig(format!("invalid base url {base_url:?}: {e}"))
        })?;

        let mut api_key = HeaderValue::from_str(credentials.api_key()).map_err(|_| {
            TradingError::InvalidConfig("api key is not a valid header value".to_string())
        })?;
        api_key.set_sensitive(true);

        let signer = RequestSigner::new(credentials)?;

        Ok(Self {
            client,
            base_url,
            api_key,
            signer,
            time,
            audit,
            request_timeout: config.request_timeout,
        })
    }

    /// Stamp and sign `payload` with an explicit timestamp.
    pub fn sign(&self, payload: ParamMap, timestamp: u64) -> SignedRequest {
        self.signer.sign_request(payload, timestamp)
    }

    /// Timestamp, sign and send `payload` to `path`.
    pub async fn send_signed(
        &self,
        method: HttpMethod,
        path: &str,
        payload: ParamMap,
    ) -> TradingResult<OrderResult> {
        let timestamp = self.time.now_ms().await;
        let request = self.sign(payload, timestamp);
        self.dispatch(method, path, &request).await
    }

    /// Send an already signed request.
    pub async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        request: &SignedRequest,
    ) -> TradingResult<OrderResult> {
        let url = endpoints::join(&self.base_url, path);

        self.audit.record(AuditEvent::Request {
            method: method.to_string(),
            url: url.clone(),
            body: request.redacted(),
        });

        let encoded = request.encoded();
        let builder = if method.has_body() {
            self.client
                .request(method.to_reqwest(), &url)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(encoded)
        } else {
            self.client
                .request(method.to_reqwest(), format!("{url}?{encoded}"))
        };

        let result = builder
            .header(endpoints::API_KEY_HEADER, self.api_key.clone())
            .timeout(self.request_timeout)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => return Err(self.failure(method, &url, e)),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return Err(self.failure(method, &url, e)),
        };

        self.audit.record(AuditEvent::Response {
            method: method.to_string(),
            url,
            status: status.as_u16(),
            body: text.clone(),
        });

        classify(status.as_u16(), status.is_success(), text)
    }

    fn failure(&self, method: HttpMethod, url: &str, err: reqwest::Error) -> TradingError {
        let err = TradingError::transport(err);
        self.audit.record(AuditEvent::Failure {
            method: method.to_string(),
            url: url.to_string(),
            reason: err.to_string(),
        });
        err
    }
}

impl fmt::Debug for SignedTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedTransport")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl OrderTransport for SignedTransport {
    fn send<'a>(
        &'a self,
        method: HttpMethod,
        path: &'a str,
        payload: ParamMap,
    ) -> BoxFuture<'a, TradingResult<OrderResult>> {
        Box::pin(self.send_signed(method, path, payload))
    }
}

/// Shared HTTP client with the default request timeout.
pub fn build_client(timeout: Duration) -> TradingResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| TradingError::InvalidConfig(format!("Failed to create HTTP client: {e}")))
}

fn classify(status: u16, success: bool, text: String) -> TradingResult<OrderResult> {
    if !success {
        return Err(TradingError::RemoteRejected {
            status,
            body: RejectBody::parse(&text),
        });
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(fields)) => Ok(OrderResult::new(fields)),
        _ => Err(TradingError::MalformedResponse { status, body: text }),
    }
}
