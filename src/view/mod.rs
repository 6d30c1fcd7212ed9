//! Views: the catalog and detail screens, their routes, and the host that
//! mounts one view at a time.
//!
//! A mounted view owns its state cell, its background tasks and at most one
//! price feed. `unmount` closes all three; afterwards nothing the view
//! started can touch its state.

pub mod app;
pub mod catalog;
pub mod detail;
pub mod route;
pub mod scope;

use crate::domain::live::LivePriceMap;
use crate::ws::FeedEvent;

pub use app::App;
pub use catalog::{CatalogState, CatalogView};
pub use detail::{DetailState, DetailStatus, DetailView};
pub use route::{Route, RouteError};
pub use scope::ViewCell;

/// Fetch state of a view that loads one thing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Error(String),
}

/// State of a view's price feed, for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FeedStatus {
    #[default]
    Pending,
    Live,
    Closed(String),
    Failed(String),
}

impl FeedStatus {
    pub fn label(&self) -> String {
        match self {
            FeedStatus::Pending => "connecting".to_string(),
            FeedStatus::Live => "live".to_string(),
            FeedStatus::Closed(reason) => format!("closed ({reason})"),
            FeedStatus::Failed(reason) => format!("unavailable ({reason})"),
        }
    }
}

/// State that receives price feed events.
pub trait LiveState {
    fn live_prices(&mut self) -> &mut LivePriceMap;
    fn feed_status(&mut self) -> &mut FeedStatus;

    /// Apply one feed event. Faults only change the feed status; prices
    /// already merged stay.
    fn apply_feed(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Connected => *self.feed_status() = FeedStatus::Live,
            FeedEvent::Prices(update) => {
                self.live_prices().merge(update);
            }
            FeedEvent::Disconnected { reason, .. } => {
                *self.feed_status() = FeedStatus::Closed(reason);
            }
            FeedEvent::StreamError(e) => *self.feed_status() = FeedStatus::Failed(e.to_string()),
            FeedEvent::ParseError(_) => {}
        }
    }
}
