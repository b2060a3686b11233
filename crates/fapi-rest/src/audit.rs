//! Audit trail for outbound requests and inbound responses.
//!
//! The transport and the time source report what they do through an
//! injected [`AuditLog`]. Events are built from already-redacted data: the
//! request body never includes the signature, and the secret never reaches
//! this module at all.

use parking_lot::Mutex;
use tracing::{debug, error, warn};

/// Target used for all audit events emitted through `tracing`.
pub const AUDIT_TARGET: &str = "fapi::audit";

/// One audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditEvent {
    /// About to send. `body` is the form-encoded payload without signature.
    Request {
        method: String,
        url: String,
        body: String,
    },
    /// Response received.
    Response {
        method: String,
        url: String,
        status: u16,
        body: String,
    },
    /// No response obtained.
    Failure {
        method: String,
        url: String,
        reason: String,
    },
    /// Server time unavailable; local clock used instead.
    TimeFallback { reason: String, local_ms: u64 },
}

/// Sink for audit events.
pub trait AuditLog: Send + Sync {
    fn record(&self, event: AuditEvent);
}

/// Forwards audit events to `tracing` under [`AUDIT_TARGET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditLog;

impl AuditLog for TracingAuditLog {
    fn record(&self, event: AuditEvent) {
        match event {
            AuditEvent::Request { method, url, body } => {
                debug!(target: AUDIT_TARGET, %method, %url, %body, "REQUEST");
            }
            AuditEvent::Response {
                method,
                url,
                status,
                body,
            } => {
                if (200..300).contains(&status) {
                    debug!(target: AUDIT_TARGET, %method, %url, status, %body, "RESPONSE");
                } else {
                    error!(
                        target: AUDIT_TARGET,
                        %method,
                        %url,
                        status,
                        %body,
                        "HTTP error response"
                    );
                }
            }
            AuditEvent::Failure {
                method,
                url,
                reason,
            } => {
                error!(target: AUDIT_TARGET, %method, %url, %reason, "Network error");
            }
            AuditEvent::TimeFallback { reason, local_ms } => {
                warn!(
                    target: AUDIT_TARGET,
                    %reason,
                    local_ms,
                    "Could not fetch server time, falling back to local time"
                );
            }
        }
    }
}

/// Keeps events in memory. Used in tests.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().clone()
    }

    /// Every event rendered with `Debug`, one per line.
    pub fn dump(&self) -> String {
        self.events
            .lock()
            .iter()
            .map(|e| format!("{e:?}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn time_fallbacks(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e, AuditEvent::TimeFallback { .. }))
            .count()
    }
}

impl AuditLog for MemoryAuditLog {
    fn record(&self, event: AuditEvent) {
        self.events.lock().push(event);
    }
}
