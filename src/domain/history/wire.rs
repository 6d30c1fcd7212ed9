//! Wire types for price history responses (REST).

use crate::shared::serde_util::timestamp_ms;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single price sample from the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPointResponse {
    pub price_usd: String,
    #[serde(with = "timestamp_ms")]
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub date: String,
}
