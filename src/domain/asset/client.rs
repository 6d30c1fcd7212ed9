//! Assets sub-client: catalog listing and single-asset lookup.

use super::convert::assets_from_wire;
use super::Asset;
use crate::client::RatesClient;
use crate::domain::Snapshot;
use crate::error::FetchError;
use crate::shared::AssetId;

/// Sub-client for asset operations.
pub struct Assets<'a> {
    pub(crate) client: &'a RatesClient,
}

impl<'a> Assets<'a> {
    /// List all assets. Records that fail validation are left out.
    pub async fn list(&self) -> Result<Snapshot<Vec<Asset>>, FetchError> {
        let resp = self.client.http.get_assets().await?;
        Ok(resp.map(assets_from_wire))
    }

    /// Get a single asset by id.
    pub async fn get(&self, id: &AssetId) -> Result<Snapshot<Asset>, FetchError> {
        let resp = self.client.http.get_asset(id).await?;
        resp.try_map(Asset::try_from)
            .map_err(|e| FetchError::InvalidPayload(e.to_string()))
    }
}
