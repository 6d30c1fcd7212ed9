//! View host: owns the mounted view and swaps it on navigation.

use super::catalog::CatalogView;
use super::detail::DetailView;
use super::route::Route;
use crate::client::RatesClient;

enum Mounted {
    Catalog(CatalogView),
    Detail(DetailView),
}

impl Mounted {
    async fn unmount(self) {
        match self {
            Mounted::Catalog(view) => view.unmount().await,
            Mounted::Detail(view) => view.unmount().await,
        }
    }
}

/// At most one view is mounted at a time. Navigating unmounts the current
/// view (closing its feed) before the next one is mounted.
pub struct App {
    client: RatesClient,
    current: Option<(Route, Mounted)>,
}

impl App {
    pub fn new(client: RatesClient) -> Self {
        Self {
            client,
            current: None,
        }
    }

    pub fn route(&self) -> Option<&Route> {
        self.current.as_ref().map(|(route, _)| route)
    }

    pub async fn navigate(&mut self, route: Route) {
        if let Some((previous, view)) = self.current.take() {
            tracing::debug!("Leaving {}", previous);
            view.unmount().await;
        }

        tracing::info!("Navigating to {}", route);
        let view = match &route {
            Route::Catalog => Mounted::Catalog(CatalogView::mount(&self.client).await),
            Route::Detail(id) => {
                let id = id.clone();
                Mounted::Detail(DetailView::mount(&self.client, async move { Some(id) }).await)
            }
        };
        self.current = Some((route, view));
    }

    /// Set the catalog search. Ignored on other views.
    pub async fn set_search(&self, query: &str) {
        if let Some((_, Mounted::Catalog(view))) = &self.current {
            view.set_search(query).await;
        }
    }

    pub async fn render(&self) -> String {
        match &self.current {
            Some((_, Mounted::Catalog(view))) => view.render().await,
            Some((_, Mounted::Detail(view))) => view.render().await,
            None => String::new(),
        }
    }

    pub fn catalog(&self) -> Option<&CatalogView> {
        match &self.current {
            Some((_, Mounted::Catalog(view))) => Some(view),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&DetailView> {
        match &self.current {
            Some((_, Mounted::Detail(view))) => Some(view),
            _ => None,
        }
    }

    /// Unmount the current view, if any.
    pub async fn shutdown(&mut self) {
        if let Some((_, view)) = self.current.take() {
            view.unmount().await;
        }
    }
}
