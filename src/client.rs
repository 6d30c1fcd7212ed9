//! High-level client: `RatesClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and accessor methods.

use crate::config::RatesConfig;
use crate::domain::asset::client::Assets;
use crate::domain::history::client::History;
use crate::error::RatesError;
use crate::http::RatesHttp;
use crate::ws::{FeedConfig, FeedScope};

// Re-export sub-client types for convenience.
pub use crate::domain::asset::client::Assets as AssetsClient;
pub use crate::domain::history::client::History as HistoryClient;

/// The primary entry point.
///
/// Provides nested sub-client accessors for each domain:
/// `client.assets()`, `client.history()`.
#[derive(Clone)]
pub struct RatesClient {
    pub(crate) http: RatesHttp,
    pub(crate) feed_config: FeedConfig,
}

impl RatesClient {
    pub fn builder() -> RatesClientBuilder {
        RatesClientBuilder::default()
    }

    /// Build a client from environment-derived configuration.
    pub fn from_config(config: &RatesConfig) -> Result<Self, RatesError> {
        Self::builder()
            .base_url(&config.api_url)
            .ws_url(&config.ws_url)
            .build()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn assets(&self) -> Assets<'_> {
        Assets { client: self }
    }

    pub fn history(&self) -> History<'_> {
        History { client: self }
    }

    /// Feed settings for opening a price feed.
    ///
    /// The feed is not embedded in `RatesClient` because its lifetime belongs
    /// to the view that opens it.
    pub fn feed_config(&self) -> &FeedConfig {
        &self.feed_config
    }

    /// Create a new (unconnected) price feed from the current config.
    #[cfg(feature = "ws-native")]
    pub fn price_feed(&self) -> crate::ws::native::PriceFeed {
        crate::ws::native::PriceFeed::new(self.feed_config.clone())
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct RatesClientBuilder {
    base_url: String,
    ws_url: String,
    scope: FeedScope,
}

impl Default for RatesClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            ws_url: crate::network::DEFAULT_WS_URL.to_string(),
            scope: FeedScope::All,
        }
    }
}

impl RatesClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn ws_url(mut self, url: &str) -> Self {
        self.ws_url = url.to_string();
        self
    }

    pub fn feed_scope(mut self, scope: FeedScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn build(self) -> Result<RatesClient, RatesError> {
        Ok(RatesClient {
            http: RatesHttp::new(&self.base_url)?,
            feed_config: FeedConfig {
                url: self.ws_url,
                scope: self.scope,
                ..FeedConfig::default()
            },
        })
    }
}
