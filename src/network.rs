//! Network URL constants.

/// Default REST API base URL (the asset collection endpoint).
pub const DEFAULT_API_URL: &str = "https://api.coincap.io/v2/assets";

/// Streaming price feed base URL. The subscription scope is appended as
/// the `assets` query parameter.
pub const DEFAULT_WS_URL: &str = "wss://ws.coincap.io/prices";

/// Environment variable holding the REST API base URL.
pub const API_URL_ENV: &str = "RATES_API_URL";
