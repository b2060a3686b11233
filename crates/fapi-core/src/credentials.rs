//! API credentials.
//!
//! Security notes:
//! - The secret bytes held here live in `Zeroizing` memory and are wiped
//!   on drop. Key material derived from them elsewhere (the request
//!   signer's keyed MAC state) is not covered and outlives this value.
//! - `Debug` never prints the secret.
//! - Nothing here reads environment variables or files; callers resolve
//!   the values and hand them in.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::{CoreError, CoreResult};

/// API key + HMAC secret pair. Immutable once constructed.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: Zeroizing<Vec<u8>>,
}

impl Credentials {
    /// # Errors
    /// Returns `InvalidCredentials` if either value is empty.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<Vec<u8>>) -> CoreResult<Self> {
        let api_key = api_key.into();
        let api_secret = Zeroizing::new(api_secret.into());

        if api_key.trim().is_empty() {
            return Err(CoreError::InvalidCredentials("api key is empty"));
        }
        if api_secret.is_empty() {
            return Err(CoreError::InvalidCredentials("api secret is empty"));
        }

        Ok(Self {
            api_key,
            api_secret,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Raw secret bytes, for keying the request signer only.
    pub fn secret_bytes(&self) -> &[u8] {
        &self.api_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
