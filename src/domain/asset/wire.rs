//! Wire types for asset responses (REST).

use serde::{Deserialize, Serialize};

/// Raw asset record. Numeric fields arrive as strings and may be `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetResponse {
    pub id: String,
    pub rank: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default, rename = "changePercent24Hr")]
    pub change_percent_24_hr: Option<String>,
    #[serde(default)]
    pub market_cap_usd: Option<String>,
}
