//! Asset catalog view: the filterable list of all assets with live prices.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use super::scope::{open_feed, pump, ViewCell, ViewScope};
use super::{FeedStatus, LiveState, LoadState};
use crate::client::RatesClient;
use crate::domain::asset::price::display_price;
use crate::domain::asset::{filter_assets, Asset};
use crate::domain::live::LivePriceMap;
use crate::domain::Snapshot;
use crate::error::FetchError;

pub const CATALOG_TITLE: &str = "Crypto Rates";
pub const FETCH_ERROR_TEXT: &str = "Failed to fetch assets. Please try again later.";

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub status: LoadState,
    /// Last fetched list, in upstream order. Never modified by the filter.
    pub assets: Vec<Asset>,
    pub search: String,
    pub live: LivePriceMap,
    pub feed: FeedStatus,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_fetch(&mut self, result: Result<Snapshot<Vec<Asset>>, FetchError>) {
        match result {
            Ok(snapshot) => {
                self.assets = snapshot.data;
                self.fetched_at = Some(snapshot.timestamp);
                self.status = LoadState::Ready;
            }
            Err(e) => {
                tracing::error!("Failed to fetch assets: {}", e);
                self.status = LoadState::Error(FETCH_ERROR_TEXT.to_string());
            }
        }
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Assets matching the current search, in list order.
    pub fn filtered(&self) -> Vec<&Asset> {
        filter_assets(&self.assets, &self.search)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{CATALOG_TITLE}");

        match &self.status {
            LoadState::Loading => {
                out.push_str("Loading...");
                return out;
            }
            LoadState::Error(message) => {
                out.push_str(message);
                return out;
            }
            LoadState::Ready => {}
        }

        if !self.search.is_empty() {
            let _ = writeln!(out, "Search: {}", self.search);
        }
        let _ = writeln!(out, "Feed: {}", self.feed.label());

        let rows = self.filtered();
        if rows.is_empty() {
            let _ = write!(out, "No assets match {:?}.", self.search);
            return out;
        }

        for asset in rows {
            let price = display_price(asset, &self.live);
            let _ = writeln!(
                out,
                "{} ({})  Rank: {}  Price: {}",
                asset.name, asset.symbol, asset.rank, price
            );
        }
        out.truncate(out.trim_end().len());
        out
    }
}

impl LiveState for CatalogState {
    fn live_prices(&mut self) -> &mut LivePriceMap {
        &mut self.live
    }

    fn feed_status(&mut self) -> &mut FeedStatus {
        &mut self.feed
    }
}

// ─── View ────────────────────────────────────────────────────────────────────

/// A mounted catalog view.
///
/// Mounting starts the list fetch and the price feed side by side; a failed
/// fetch does not stop the feed.
pub struct CatalogView {
    cell: ViewCell<CatalogState>,
    scope: ViewScope,
}

impl CatalogView {
    pub async fn mount(client: &RatesClient) -> Self {
        let cell = ViewCell::new(CatalogState::new());
        let mut scope = ViewScope::new();

        let fetch_client = client.clone();
        let fetch_cell = cell.clone();
        scope.spawn(async move {
            let result = fetch_client.assets().list().await;
            if fetch_cell.update(|s| s.apply_fetch(result)).await.is_none() {
                tracing::debug!("Catalog unmounted before fetch completed");
            }
        });

        if let Some(events) = open_feed(&scope.slot(), &cell, client.price_feed()).await {
            scope.spawn(pump(cell.clone(), events));
        }

        tracing::info!("Catalog view mounted");
        Self { cell, scope }
    }

    pub async fn set_search(&self, query: &str) {
        let query = query.to_string();
        self.cell.update(move |s| s.set_search(query)).await;
    }

    pub async fn render(&self) -> String {
        self.cell.read(CatalogState::render).await
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> CatalogState {
        self.cell.read(CatalogState::clone).await
    }

    pub fn cell(&self) -> &ViewCell<CatalogState> {
        &self.cell
    }

    /// Close the feed, stop the tasks, and freeze the state.
    pub async fn unmount(mut self) {
        self.scope.close(&self.cell).await;
        tracing::info!("Catalog view unmounted");
    }
}
