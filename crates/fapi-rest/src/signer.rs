//! HMAC-SHA256 request signing.
//!
//! The signature covers the form-encoded parameters, in insertion order,
//! with `timestamp` included and `signature` itself excluded. The same
//! encoding is what goes on the wire, so the exchange recomputes the digest
//! over exactly the bytes that were signed.

use std::fmt;

use fapi_core::{CoreError, Credentials};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::params::ParamMap;

type HmacSha256 = Hmac<Sha256>;

pub const TIMESTAMP_KEY: &str = "timestamp";
pub const SIGNATURE_KEY: &str = "signature";

/// Keyed HMAC-SHA256 signer.
///
/// Holds the keyed MAC state rather than the raw secret; each signature
/// starts from a clone of it. That state is derived from the secret and is
/// not zeroized on drop; treat a signer as secret material.
#[derive(Clone)]
pub struct RequestSigner {
    mac: HmacSha256,
}

impl RequestSigner {
    /// # Errors
    /// Returns `InvalidCredentials` if the secret cannot key the MAC.
    pub fn new(credentials: &Credentials) -> Result<Self, CoreError> {
        Self::from_secret(credentials.secret_bytes())
    }

    pub fn from_secret(secret: &[u8]) -> Result<Self, CoreError> {
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|_| CoreError::InvalidCredentials("secret rejected by HMAC"))?;
        Ok(Self { mac })
    }

    /// Lowercase hex HMAC over `params`, excluding any `signature` entry.
    pub fn sign(&self, params: &ParamMap) -> String {
        self.sign_str(&params.encode_excluding(&[SIGNATURE_KEY]))
    }

    fn sign_str(&self, payload: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Stamp `payload` with `timestamp`, sign it, and append the signature
    /// as the final field.
    ///
    /// A `timestamp` already present is overwritten in place; a stale
    /// `signature` is dropped before signing.
    pub fn sign_request(&self, payload: ParamMap, timestamp: u64) -> SignedRequest {
        let mut params = payload;
        params.remove(SIGNATURE_KEY);
        params.insert(TIMESTAMP_KEY, timestamp.to_string());

        let signature = self.sign(&params);
        params.insert(SIGNATURE_KEY, signature);

        SignedRequest { params, timestamp }
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner").finish_non_exhaustive()
    }
}

/// Parameters with `timestamp` and a trailing `signature`.
///
/// Only [`RequestSigner::sign_request`] constructs one, so the signature is
/// always the last field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    params: ParamMap,
    timestamp: u64,
}

impl SignedRequest {
    /// Full form-encoded request, signature last.
    pub fn encoded(&self) -> String {
        self.params.encode()
    }

    /// Form-encoded request without the signature, for logging.
    pub fn redacted(&self) -> String {
        self.params.encode_excluding(&[SIGNATURE_KEY])
    }

    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn signature(&self) -> &str {
        self.params.get_str(SIGNATURE_KEY).unwrap_or_default()
    }
}
