//! Asset domain: listed assets, validation, search filter, price reconciliation.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod price;
pub mod wire;

use crate::shared::AssetId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Asset ───────────────────────────────────────────────────────────────────

/// A listed asset with its snapshot market data.
///
/// Immutable per fetch; a refetch replaces the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub rank: u32,
    pub symbol: String,
    pub name: String,
    /// Snapshot price; the baseline every trend is computed against.
    pub price_usd: Decimal,
    pub change_percent_24h: Option<Decimal>,
    pub market_cap_usd: Option<Decimal>,
}

impl Asset {
    /// Case-insensitive substring match over name and symbol.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.symbol.to_lowercase().contains(&needle)
    }
}

/// Assets whose name or symbol contains `query`, case-insensitively, in
/// their original order. The input slice is left untouched.
pub fn filter_assets<'a>(assets: &'a [Asset], query: &str) -> Vec<&'a Asset> {
    assets.iter().filter(|a| a.matches(query)).collect()
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingId,
    MissingPrice(String),
    InvalidNumber {
        asset: String,
        field: &'static str,
        value: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingId => write!(f, "Missing asset id"),
            ValidationError::MissingPrice(id) => write!(f, "Missing price for {}", id),
            ValidationError::InvalidNumber {
                asset,
                field,
                value,
            } => write!(f, "Invalid {} for {}: {:?}", field, asset, value),
        }
    }
}

impl std::error::Error for ValidationError {}
