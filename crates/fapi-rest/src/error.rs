//! Trading error types.
//!
//! Every failure a caller of the order client can see. None of the
//! variants ever carry the API secret or the request signature.

use fapi_core::CoreError;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TradingError {
    /// Local precondition failed; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(#[from] CoreError),

    /// No response was obtained (DNS, refused, timeout, TLS, body read).
    #[error("Transport failure: {0}")]
    TransportFailure(#[source] reqwest::Error),

    /// The exchange answered with a non-success status.
    #[error("Remote rejected (HTTP {status}): {body}")]
    RemoteRejected { status: u16, body: RejectBody },

    /// Success status, but the body is not a JSON object.
    #[error("Malformed response (HTTP {status}): {body}")]
    MalformedResponse { status: u16, body: String },

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl TradingError {
    /// Wrap a reqwest error, dropping the URL (a GET URL carries the signed
    /// query string).
    pub fn transport(err: reqwest::Error) -> Self {
        Self::TransportFailure(err.without_url())
    }

    /// Exchange error code, when the rejection carried one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::RemoteRejected {
                body: RejectBody::Api { code, .. },
                ..
            } => Some(*code),
            _ => None,
        }
    }

    /// Short name of the error class, for display.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::TransportFailure(_) => "TransportFailure",
            Self::RemoteRejected { .. } => "RemoteRejected",
            Self::MalformedResponse { .. } => "MalformedResponse",
            Self::InvalidConfig(_) => "InvalidConfig",
        }
    }
}

/// Decoded body of a rejected request.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectBody {
    /// Standard `{"code": .., "msg": ..}` error.
    Api { code: i64, msg: String },
    /// Some other JSON document.
    Structured(serde_json::Value),
    /// Not JSON at all.
    Raw(String),
}

#[derive(Deserialize)]
struct ApiErrorBody {
    code: i64,
    msg: String,
}

impl RejectBody {
    pub fn parse(text: &str) -> Self {
        if let Ok(api) = serde_json::from_str::<ApiErrorBody>(text) {
            return Self::Api {
                code: api.code,
                msg: api.msg,
            };
        }
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => Self::Structured(value),
            Err(_) => Self::Raw(text.to_string()),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Api { msg, .. } => Some(msg),
            _ => None,
        }
    }
}

impl std::fmt::Display for RejectBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api { code, msg } => write!(f, "code={code} msg={msg}"),
            Self::Structured(value) => write!(f, "{value}"),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

pub type TradingResult<T> = Result<T, TradingError>;
