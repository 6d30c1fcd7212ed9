//! Live price domain: partial price updates from the feed and the map they
//! are merged into.

pub mod state;
pub mod wire;

use crate::shared::AssetId;
use rust_decimal::Decimal;
use std::collections::HashMap;

pub use state::LivePriceMap;

/// One inbound feed message: the assets whose price changed, and their new
/// prices. Assets not mentioned are unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceUpdate {
    pub prices: HashMap<AssetId, Decimal>,
}

impl PriceUpdate {
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<Decimal> {
        self.prices.get(id).copied()
    }
}
