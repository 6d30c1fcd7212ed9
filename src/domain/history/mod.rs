//! Price history domain: time series samples for the detail chart.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use convert::history_from_wire;

/// One sample of an asset's price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetHistoryPoint {
    pub price_usd: Decimal,
    pub time: DateTime<Utc>,
    /// Upstream ISO-8601 date string, kept verbatim.
    pub date: String,
}

impl AssetHistoryPoint {
    /// `M/D/YYYY` label used on the chart's x axis.
    pub fn label(&self) -> String {
        self.time.format("%-m/%-d/%Y").to_string()
    }
}
