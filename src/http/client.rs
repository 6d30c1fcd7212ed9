//! Low-level HTTP client: `RatesHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the sub-clients). Requests are made once: a failure is returned
//! to the caller as-is.

use crate::domain::asset::wire::AssetResponse;
use crate::domain::history::wire::HistoryPointResponse;
use crate::domain::wire::Envelope;
use crate::error::FetchError;
use crate::shared::{AssetId, Interval};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Request timeout applied by the underlying client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Low-level HTTP client for the asset REST API.
#[derive(Clone)]
pub struct RatesHttp {
    base_url: String,
    client: Client,
}

impl RatesHttp {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(4)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Assets ───────────────────────────────────────────────────────────

    pub async fn get_assets(&self) -> Result<Envelope<Vec<AssetResponse>>, FetchError> {
        self.get(&self.base_url).await
    }

    pub async fn get_asset(&self, id: &AssetId) -> Result<Envelope<AssetResponse>, FetchError> {
        let url = self.asset_url(id);
        self.get(&url).await
    }

    // ── Price History ────────────────────────────────────────────────────

    pub async fn get_asset_history(
        &self,
        id: &AssetId,
        interval: Interval,
    ) -> Result<Envelope<Vec<HistoryPointResponse>>, FetchError> {
        let url = format!("{}/history?interval={}", self.asset_url(id), interval.as_str());
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    fn asset_url(&self, id: &AssetId) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(id.as_str()))
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!("GET {}", url);

        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();
        tracing::debug!(status = status_code, "GET {} failed", url);

        Err(error_for_status(status_code, body_text))
    }
}

/// Map a non-success status to its `FetchError`.
fn error_for_status(status: u16, body: String) -> FetchError {
    match status {
        404 => FetchError::NotFound(body),
        429 => FetchError::RateLimited,
        400..=499 => FetchError::BadRequest(body),
        _ => FetchError::ServerError { status, body },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let http = RatesHttp::new("http://localhost:8080/v2/assets/").unwrap();
        assert_eq!(http.base_url(), "http://localhost:8080/v2/assets");
    }

    #[test]
    fn test_asset_url_encodes_id() {
        let http = RatesHttp::new("http://localhost/assets").unwrap();
        assert_eq!(
            http.asset_url(&AssetId::from("usd coin")),
            "http://localhost/assets/usd%20coin"
        );
        assert_eq!(
            http.asset_url(&AssetId::from("bitcoin")),
            "http://localhost/assets/bitcoin"
        );
    }

    #[test]
    fn test_error_for_status() {
        assert!(matches!(error_for_status(404, "x".into()), FetchError::NotFound(_)));
        assert!(matches!(error_for_status(429, String::new()), FetchError::RateLimited));
        assert!(matches!(error_for_status(403, String::new()), FetchError::BadRequest(_)));
        assert!(matches!(
            error_for_status(500, "boom".into()),
            FetchError::ServerError { status: 500, .. }
        ));
        assert!(matches!(
            error_for_status(302, String::new()),
            FetchError::ServerError { status: 302, .. }
        ));
    }
}
