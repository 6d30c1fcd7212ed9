//! Asset detail view: one asset, its live price tile, and its price chart.
//!
//! Initialization runs in two phases: the asset id is resolved from a
//! deferred value first, then the asset and its history are fetched in
//! sequence. The feed opens only once both fetches succeeded.

use std::fmt::Write as _;
use std::future::Future;

use super::scope::{open_feed, pump, ViewCell, ViewScope};
use super::{FeedStatus, LiveState};
use crate::chart::{self, ChartRegistry, LineChart};
use crate::client::RatesClient;
use crate::domain::asset::price::{display_price, DisplayPrice};
use crate::domain::asset::Asset;
use crate::domain::history::AssetHistoryPoint;
use crate::domain::live::LivePriceMap;
use crate::domain::Snapshot;
use crate::error::FetchError;
use crate::shared::fmt::display_grouped;
use crate::shared::{AssetId, Interval};

pub const DETAIL_TITLE: &str = "Asset Details";

const CHART_WIDTH: usize = 60;
const CHART_HEIGHT: usize = 6;

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailStatus {
    /// Waiting for the asset id.
    #[default]
    Resolving,
    /// Id known, fetching asset and history.
    Loading,
    Ready,
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct DetailState {
    pub id: Option<AssetId>,
    pub status: DetailStatus,
    pub asset: Option<Asset>,
    pub history: Vec<AssetHistoryPoint>,
    pub chart: Option<LineChart>,
    pub live: LivePriceMap,
    pub feed: FeedStatus,
}

impl DetailState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase one finished.
    pub fn resolved(&mut self, id: AssetId) {
        self.id = Some(id);
        self.status = DetailStatus::Loading;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = DetailStatus::Error(message.into());
    }

    /// Returns whether loading should continue.
    pub fn apply_asset(&mut self, result: Result<Snapshot<Asset>, FetchError>) -> bool {
        match result {
            Ok(snapshot) => {
                self.asset = Some(snapshot.data);
                true
            }
            Err(FetchError::NotFound(_)) => {
                let id = self.id.as_ref().map(AssetId::as_str).unwrap_or_default();
                self.fail(format!("Asset {id:?} not found."));
                false
            }
            Err(e) => {
                tracing::error!("Failed to fetch asset data: {}", e);
                self.fail("Failed to fetch asset data.");
                false
            }
        }
    }

    /// Returns whether loading should continue.
    pub fn apply_history(
        &mut self,
        result: Result<Snapshot<Vec<AssetHistoryPoint>>, FetchError>,
    ) -> bool {
        match result {
            Ok(snapshot) => {
                self.chart = Some(LineChart::from_history(&snapshot.data));
                self.history = snapshot.data;
                self.status = DetailStatus::Ready;
                true
            }
            Err(e) => {
                tracing::error!("Failed to fetch asset price history: {}", e);
                self.fail("Failed to fetch asset price history.");
                false
            }
        }
    }

    /// Price tile value, once the asset is loaded.
    pub fn price(&self) -> Option<DisplayPrice> {
        self.asset.as_ref().map(|a| display_price(a, &self.live))
    }

    pub fn render(&self, registry: &ChartRegistry) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{DETAIL_TITLE}");

        let asset = match (&self.status, &self.asset) {
            (DetailStatus::Error(message), _) => {
                out.push_str(message);
                return out;
            }
            (DetailStatus::Ready, Some(asset)) => asset,
            _ => {
                out.push_str("Loading...");
                return out;
            }
        };

        let _ = writeln!(out, "{}", asset.name);
        let _ = writeln!(out, "Symbol: {}", asset.symbol);
        let _ = writeln!(out, "Rank: {}", asset.rank);
        let _ = writeln!(out, "Price: {}", display_price(asset, &self.live));
        match asset.market_cap_usd {
            Some(cap) => {
                let _ = writeln!(out, "Market Cap: ${}", display_grouped(cap, 3));
            }
            None => {
                let _ = writeln!(out, "Market Cap: n/a");
            }
        }
        let _ = writeln!(out, "Feed: {}", self.feed.label());
        let _ = writeln!(out);
        let _ = writeln!(out, "Price History");

        let chart_text = match &self.chart {
            Some(chart) => chart.render(registry, CHART_WIDTH, CHART_HEIGHT),
            None => chart::EMPTY_CHART_PLACEHOLDER.to_string(),
        };
        out.push_str(&chart_text);
        out
    }
}

impl LiveState for DetailState {
    fn live_prices(&mut self) -> &mut LivePriceMap {
        &mut self.live
    }

    fn feed_status(&mut self) -> &mut FeedStatus {
        &mut self.feed
    }
}

// ─── View ────────────────────────────────────────────────────────────────────

/// A mounted detail view.
pub struct DetailView {
    cell: ViewCell<DetailState>,
    scope: ViewScope,
    registry: &'static ChartRegistry,
}

impl DetailView {
    /// Mount the view for the asset id `id` will yield.
    ///
    /// `None` from `id` puts the view in the error state.
    pub async fn mount<F>(client: &RatesClient, id: F) -> Self
    where
        F: Future<Output = Option<AssetId>> + Send + 'static,
    {
        let registry = chart::register();
        let cell = ViewCell::new(DetailState::new());
        let mut scope = ViewScope::new();

        scope.spawn(load(client.clone(), id, cell.clone(), scope.slot()));

        tracing::info!("Detail view mounted");
        Self {
            cell,
            scope,
            registry,
        }
    }

    pub async fn render(&self) -> String {
        let registry = self.registry;
        self.cell.read(|s| s.render(registry)).await
    }

    pub async fn snapshot(&self) -> DetailState {
        self.cell.read(DetailState::clone).await
    }

    pub fn cell(&self) -> &ViewCell<DetailState> {
        &self.cell
    }

    pub async fn unmount(mut self) {
        self.scope.close(&self.cell).await;
        tracing::info!("Detail view unmounted");
    }
}

/// Resolve, fetch, then stream. Each step stops once the view is closed.
async fn load<F>(
    client: RatesClient,
    id: F,
    cell: ViewCell<DetailState>,
    slot: super::scope::FeedSlot,
) where
    F: Future<Output = Option<AssetId>> + Send + 'static,
{
    // ── Phase 1: resolve ─────────────────────────────────────────────
    let Some(id) = id.await else {
        cell.update(|s| s.fail("Missing asset id.")).await;
        return;
    };
    tracing::debug!("Detail view resolved asset {}", id);
    if cell.update(|s| s.resolved(id.clone())).await.is_none() {
        return;
    }

    // ── Phase 2: fetch ───────────────────────────────────────────────
    let asset = client.assets().get(&id).await;
    if cell.update(|s| s.apply_asset(asset)).await != Some(true) {
        return;
    }

    let history = client.history().get(&id, Interval::Day1).await;
    if cell.update(|s| s.apply_history(history)).await != Some(true) {
        return;
    }

    // ── Stream ───────────────────────────────────────────────────────
    if let Some(events) = open_feed(&slot, &cell, client.price_feed()).await {
        pump(cell, events).await;
    }
}
