//! View lifetime plumbing: the state cell with its liveness flag, and the
//! scope that owns a view's tasks and feed.

use std::future::Future;
use std::sync::Arc;

use async_lock::{Mutex, RwLock};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::LiveState;
use crate::ws::native::PriceFeed;
use crate::ws::FeedEvent;

// ─── ViewCell ────────────────────────────────────────────────────────────────

struct Scoped<S> {
    live: bool,
    state: S,
}

/// Shared view state. Writes are refused once the cell is closed; the flag
/// is checked under the same write lock that guards the state.
pub struct ViewCell<S> {
    inner: Arc<RwLock<Scoped<S>>>,
}

impl<S> Clone for ViewCell<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> ViewCell<S> {
    pub fn new(state: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Scoped { live: true, state })),
        }
    }

    /// Run `f` on the state if the cell is still open. Returns `None` when
    /// the write was dropped.
    pub async fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        let mut guard = self.inner.write().await;
        if !guard.live {
            return None;
        }
        Some(f(&mut guard.state))
    }

    pub async fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let guard = self.inner.read().await;
        f(&guard.state)
    }

    pub async fn is_live(&self) -> bool {
        self.inner.read().await.live
    }

    /// Refuse all further writes.
    pub async fn close(&self) {
        self.close_with(|_| {}).await;
    }

    /// Run `teardown` on the state and refuse all further writes, under one
    /// write lock.
    pub async fn close_with(&self, teardown: impl FnOnce(&mut S)) {
        let mut guard = self.inner.write().await;
        if guard.live {
            teardown(&mut guard.state);
            guard.live = false;
        }
    }
}

// ─── ViewScope ───────────────────────────────────────────────────────────────

pub(crate) type FeedSlot = Arc<Mutex<Option<PriceFeed>>>;

/// Tasks and feed owned by one mounted view.
pub(crate) struct ViewScope {
    slot: FeedSlot,
    tasks: Vec<JoinHandle<()>>,
}

impl ViewScope {
    pub(crate) fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            tasks: Vec::new(),
        }
    }

    pub(crate) fn slot(&self) -> FeedSlot {
        Arc::clone(&self.slot)
    }

    pub(crate) fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.push(tokio::spawn(task));
    }

    /// Close the cell and reset its live prices, then close the feed (once),
    /// then abort the tasks.
    pub(crate) async fn close<S: LiveState>(&mut self, cell: &ViewCell<S>) {
        cell.close_with(|s| s.live_prices().clear()).await;

        let feed = self.slot.lock().await.take();
        if let Some(mut feed) = feed {
            if let Err(e) = feed.disconnect().await {
                tracing::debug!("Price feed already closed: {}", e);
            }
        }

        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

/// Start `feed` and park it in `slot`, unless the view is already closed.
///
/// Liveness is checked while holding the slot, and `ViewScope::close` closes
/// the cell before it takes the slot, so a feed is either parked and later
/// closed by the scope, or never started.
pub(crate) async fn open_feed<S>(
    slot: &FeedSlot,
    cell: &ViewCell<S>,
    mut feed: PriceFeed,
) -> Option<mpsc::Receiver<FeedEvent>> {
    let mut guard = slot.lock().await;
    if guard.is_some() || !cell.is_live().await {
        return None;
    }

    let events = feed.take_events()?;
    if let Err(e) = feed.connect().await {
        tracing::warn!("Price feed failed to start: {}", e);
        return None;
    }
    *guard = Some(feed);
    Some(events)
}

/// Apply feed events to the view state until the feed ends or the view closes.
pub(crate) async fn pump<S: LiveState>(cell: ViewCell<S>, mut events: mpsc::Receiver<FeedEvent>) {
    while let Some(event) = events.recv().await {
        match &event {
            FeedEvent::Connected => tracing::debug!("View feed connected"),
            FeedEvent::Disconnected { code, reason } => {
                tracing::info!(?code, "View feed closed: {}", reason);
            }
            FeedEvent::StreamError(e) => tracing::warn!("View feed error: {}", e),
            _ => {}
        }
        if cell.update(|state| state.apply_feed(event)).await.is_none() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::live::PriceUpdate;
    use crate::view::{CatalogState, FeedStatus};

    #[tokio::test]
    async fn test_update_refused_after_close() {
        let cell = ViewCell::new(0u32);
        assert_eq!(cell.update(|n| {
            *n += 1;
            *n
        }).await, Some(1));

        cell.close().await;
        assert!(!cell.is_live().await);
        assert_eq!(cell.update(|n| *n += 1).await, None);
        assert_eq!(cell.read(|n| *n).await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_liveness() {
        let cell = ViewCell::new(String::new());
        let writer = cell.clone();
        cell.close().await;
        assert!(writer.update(|s| s.push('x')).await.is_none());
    }

    #[tokio::test]
    async fn test_close_with_runs_teardown_once() {
        let cell = ViewCell::new(vec![1, 2]);
        cell.close_with(|v| v.clear()).await;
        assert!(cell.read(Vec::is_empty).await);

        cell.update(|v| v.push(3)).await;
        cell.close_with(|v| v.push(4)).await;
        assert!(cell.read(Vec::is_empty).await);
    }

    #[tokio::test]
    async fn test_scope_close_resets_live_prices() {
        let cell = ViewCell::new(CatalogState::new());
        let (update, _) = PriceUpdate::parse(r#"{"bitcoin":"51000"}"#).unwrap();
        cell.update(|s| {
            s.apply_feed(FeedEvent::Connected);
            s.apply_feed(FeedEvent::Prices(update));
        })
        .await;
        assert_eq!(cell.read(|s| s.live.len()).await, 1);

        let mut scope = ViewScope::new();
        scope.close(&cell).await;

        let (live, feed) = cell.read(|s| (s.live.clone(), s.feed.clone())).await;
        assert!(live.is_empty());
        assert_eq!(live.update_count(), 0);
        assert_eq!(feed, FeedStatus::Live);
        assert!(!cell.is_live().await);
    }

    #[tokio::test]
    async fn test_close_aborts_tasks() {
        let cell = ViewCell::new(CatalogState::new());
        let mut scope = ViewScope::new();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        scope.spawn(async move {
            let _keep = tx;
            std::future::pending::<()>().await;
        });

        scope.close(&cell).await;
        // The aborted task drops its sender.
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn test_open_feed_refused_after_close() {
        let cell = ViewCell::new(CatalogState::new());
        let scope = ViewScope::new();
        cell.close().await;

        let feed = PriceFeed::new(crate::ws::FeedConfig::default());
        assert!(open_feed(&scope.slot(), &cell, feed).await.is_none());
        assert!(scope.slot().lock().await.is_none());
    }
}
