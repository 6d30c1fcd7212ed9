//! Price history sub-client.

use super::{history_from_wire, AssetHistoryPoint};
use crate::client::RatesClient;
use crate::domain::Snapshot;
use crate::error::FetchError;
use crate::shared::{AssetId, Interval};

/// Sub-client for price history operations.
pub struct History<'a> {
    pub(crate) client: &'a RatesClient,
}

impl<'a> History<'a> {
    /// Price history for an asset, oldest sample first.
    ///
    /// An unknown asset may come back as an empty series rather than an error.
    pub async fn get(
        &self,
        id: &AssetId,
        interval: Interval,
    ) -> Result<Snapshot<Vec<AssetHistoryPoint>>, FetchError> {
        let resp = self.client.http.get_asset_history(id, interval).await?;
        Ok(resp.map(history_from_wire))
    }

    /// Daily price history.
    pub async fn daily(&self, id: &AssetId) -> Result<Snapshot<Vec<AssetHistoryPoint>>, FetchError> {
        self.get(id, Interval::default()).await
    }
}
