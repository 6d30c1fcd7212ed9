//! Price feed layer: scope, events, message decoding.
//!
//! The transport lives in `native.rs` (`tokio-tungstenite`, feature
//! `ws-native`). This module defines the transport-independent types.
//!
//! A feed is owned by exactly one view. It never reconnects: a dropped
//! connection is reported as an event and the view keeps its last prices.

pub mod subscriptions;

#[cfg(feature = "ws-native")]
pub mod native;

use crate::domain::live::PriceUpdate;
use crate::error::{ParseError, StreamError};

pub use subscriptions::FeedScope;

// ─── FeedEvent ───────────────────────────────────────────────────────────────

/// Events emitted by the feed to its consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Connection established.
    Connected,
    /// A price message with at least one valid entry.
    Prices(PriceUpdate),
    /// Connection closed, by either side. Not followed by a reconnect.
    Disconnected { code: Option<u16>, reason: String },
    /// Connection-level failure. Non-fatal for the view.
    StreamError(StreamError),
    /// A message (or a single price inside it) could not be parsed.
    ParseError(ParseError),
}

/// Decode one inbound text frame into the events it produces.
///
/// Rejected entries come first, then the update itself (when non-empty).
pub fn decode_message(text: &str) -> Vec<FeedEvent> {
    match PriceUpdate::parse(text) {
        Ok((update, rejected)) => {
            let mut events: Vec<FeedEvent> =
                rejected.into_iter().map(FeedEvent::ParseError).collect();
            if !update.is_empty() {
                events.push(FeedEvent::Prices(update));
            }
            events
        }
        Err(e) => vec![FeedEvent::ParseError(e)],
    }
}

// ─── FeedConfig ──────────────────────────────────────────────────────────────

/// Configuration for a price feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    /// Base URL without the `assets` query parameter.
    pub url: String,
    pub scope: FeedScope,
    /// Capacity of the event channel handed to the consumer.
    pub event_buffer: usize,
    pub connect_timeout_ms: u64,
    /// How long `disconnect()` waits for the background task to finish.
    pub close_timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: crate::network::DEFAULT_WS_URL.to_string(),
            scope: FeedScope::All,
            event_buffer: 256,
            connect_timeout_ms: 30_000,
            close_timeout_ms: 5_000,
        }
    }
}

impl FeedConfig {
    /// Full connection URL, e.g. `wss://ws.coincap.io/prices?assets=ALL`.
    pub fn endpoint(&self) -> String {
        let sep = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}assets={}", self.url, sep, self.scope.query_value())
    }
}
