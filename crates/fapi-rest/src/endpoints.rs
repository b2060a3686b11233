//! USDT-M futures REST endpoints.

/// Futures testnet base URL.
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Server time (unauthenticated, GET).
pub const TIME: &str = "/fapi/v1/time";

/// New order (signed, POST).
pub const ORDER: &str = "/fapi/v1/order";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Join a base URL and an endpoint path, tolerating a trailing slash on the base.
pub fn join(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
