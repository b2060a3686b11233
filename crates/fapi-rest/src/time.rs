//! Request timestamps.
//!
//! The exchange rejects signed requests whose `timestamp` falls outside its
//! freshness window, so the preferred source is the exchange's own clock.
//! Fetching it is best-effort: a few hundred milliseconds of drift are
//! tolerated remotely, while failing here would block order submission.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::audit::{AuditEvent, AuditLog};
use crate::endpoints;
use crate::error::TradingError;
use crate::transport::BoxFuture;

/// Default timeout for the server time request.
pub const DEFAULT_TIME_TIMEOUT: Duration = Duration::from_secs(5);

/// Source of request timestamps (milliseconds since Unix epoch). Never fails.
pub trait TimeSource: Send + Sync {
    fn now_ms(&self) -> BoxFuture<'_, u64>;
}

/// Local wall-clock time in milliseconds.
pub fn local_now_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl TimeSource for LocalClock {
    fn now_ms(&self) -> BoxFuture<'_, u64> {
        Box::pin(std::future::ready(local_now_ms()))
    }
}

/// Always returns the same timestamp.
#[derive(Debug, Clone, Copy)]
pub struct FixedTime(pub u64);

impl TimeSource for FixedTime {
    fn now_ms(&self) -> BoxFuture<'_, u64> {
        Box::pin(std::future::ready(self.0))
    }
}

#[derive(Debug, Deserialize)]
struct ServerTimeResponse {
    #[serde(rename = "serverTime")]
    server_time: Option<u64>,
}

/// Exchange clock via `GET /fapi/v1/time`, falling back to [`LocalClock`].
pub struct ServerTimeSource {
    client: Client,
    url: String,
    timeout: Duration,
    audit: Arc<dyn AuditLog>,
}

impl ServerTimeSource {
    pub fn new(client: Client, base_url: &str, audit: Arc<dyn AuditLog>) -> Self {
        Self {
            client,
            url: endpoints::join(base_url, endpoints::TIME),
            timeout: DEFAULT_TIME_TIMEOUT,
            audit,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<u64, String> {
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| TradingError::transport(e).to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }

        let body: ServerTimeResponse = response
            .json()
            .await
            .map_err(|e| format!("malformed server time response: {}", e.without_url()))?;

        match body.server_time {
            Some(ms) if ms > 0 => Ok(ms),
            _ => Err("serverTime missing from response".to_string()),
        }
    }

    async fn now(&self) -> u64 {
        match self.fetch().await {
            Ok(ms) => ms,
            Err(reason) => {
                let local_ms = local_now_ms();
                self.audit.record(AuditEvent::TimeFallback { reason, local_ms });
                local_ms
            }
        }
    }
}

impl TimeSource for ServerTimeSource {
    fn now_ms(&self) -> BoxFuture<'_, u64> {
        Box::pin(self.now())
    }
}
