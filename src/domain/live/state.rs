//! Live price state container: app-owned, crate-provided update logic.

use super::PriceUpdate;
use crate::shared::AssetId;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Latest streamed price per asset.
///
/// Merges are shallow and last-write-wins per key. Entries are never evicted
/// while the owning view is mounted; teardown clears the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LivePriceMap {
    prices: HashMap<AssetId, Decimal>,
    updates: u64,
}

impl LivePriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a feed message. Returns how many entries were written.
    pub fn merge(&mut self, update: PriceUpdate) -> usize {
        let written = update.prices.len();
        self.prices.extend(update.prices);
        self.updates += 1;
        written
    }

    pub fn get(&self, id: &AssetId) -> Option<Decimal> {
        self.prices.get(id).copied()
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.prices.contains_key(id)
    }

    /// Number of merged messages.
    pub fn update_count(&self) -> u64 {
        self.updates
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn clear(&mut self) {
        self.prices.clear();
        self.updates = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AssetId, &Decimal)> {
        self.prices.iter()
    }
}
