//! # CoinCap Rates
//!
//! A client for crypto asset rates: REST snapshots of the asset catalog, a
//! single asset and its price history, overlaid with live ticks from the
//! CoinCap price feed.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Domain types, wire types, price reconciliation, chart model
//! 2. **HTTP API**: `RatesHttp`, one method per endpoint, no retries
//! 3. **WebSocket**: `PriceFeed` over `tokio-tungstenite`
//! 4. **High-Level Client**: `RatesClient` with nested sub-clients
//! 5. **Views**: catalog and detail views with a mount/unmount lifecycle
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coincap_rates::prelude::*;
//!
//! let client = RatesClient::builder()
//!     .base_url("https://api.coincap.io/v2/assets")
//!     .build()?;
//!
//! let assets = client.assets().list().await?;
//! let view = CatalogView::mount(&client).await;
//! println!("{}", view.render().await);
//! view.unmount().await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Line chart model and one-time chart registration.
pub mod chart;

/// Unified error types.
pub mod error;

/// Network URL constants.
pub mod network;

/// Environment-driven configuration.
#[cfg(feature = "http")]
pub mod config;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// Low-level HTTP client.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: WebSocket ───────────────────────────────────────────────────────

/// Price feed: events, scope, native transport.
pub mod ws;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `RatesClient`: the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 5: Views ───────────────────────────────────────────────────────────

/// Catalog and detail views, routes, and the view host.
#[cfg(feature = "native")]
pub mod view;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AssetId, Interval};

    // Domain types
    pub use crate::domain::asset::price::{display_price, DisplayPrice, Trend};
    pub use crate::domain::asset::{filter_assets, Asset};
    pub use crate::domain::history::AssetHistoryPoint;
    pub use crate::domain::live::LivePriceMap;
    pub use crate::domain::Snapshot;

    // Chart
    pub use crate::chart::{register as register_chart, ChartRegistry, LineChart};

    // Errors
    pub use crate::error::{ConfigError, FetchError, ParseError, RatesError, StreamError};

    // Network + config
    #[cfg(feature = "http")]
    pub use crate::config::RatesConfig;
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_WS_URL};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{AssetsClient, HistoryClient, RatesClient, RatesClientBuilder};

    // WebSocket types
    pub use crate::ws::{FeedConfig, FeedEvent, FeedScope};
    #[cfg(feature = "ws-native")]
    pub use crate::ws::native::PriceFeed;

    // Views
    #[cfg(feature = "native")]
    pub use crate::view::{
        App, CatalogState, CatalogView, DetailState, DetailStatus, DetailView, FeedStatus,
        LoadState, Route, RouteError,
    };
}
