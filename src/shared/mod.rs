//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the backend sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;
pub mod price;
pub mod serde_util;

pub use price::parse_price;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── AssetId ─────────────────────────────────────────────────────────────────

/// Newtype for asset identifiers (e.g. `"bitcoin"`, `"ethereum"`).
///
/// The same key is used by the REST API and by the price feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for AssetId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AssetId(s.to_string()))
    }
}

impl std::borrow::Borrow<str> for AssetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for AssetId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AssetId(s))
    }
}

// ─── Interval ────────────────────────────────────────────────────────────────

/// Price history sampling interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "m1")]
    Minute1,
    #[serde(rename = "m5")]
    Minute5,
    #[serde(rename = "m15")]
    Minute15,
    #[serde(rename = "m30")]
    Minute30,
    #[serde(rename = "h1")]
    Hour1,
    #[serde(rename = "h2")]
    Hour2,
    #[serde(rename = "h6")]
    Hour6,
    #[serde(rename = "h12")]
    Hour12,
    #[default]
    #[serde(rename = "d1")]
    Day1,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute1 => "m1",
            Self::Minute5 => "m5",
            Self::Minute15 => "m15",
            Self::Minute30 => "m30",
            Self::Hour1 => "h1",
            Self::Hour2 => "h2",
            Self::Hour6 => "h6",
            Self::Hour12 => "h12",
            Self::Day1 => "d1",
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m1" => Ok(Self::Minute1),
            "m5" => Ok(Self::Minute5),
            "m15" => Ok(Self::Minute15),
            "m30" => Ok(Self::Minute30),
            "h1" => Ok(Self::Hour1),
            "h2" => Ok(Self::Hour2),
            "h6" => Ok(Self::Hour6),
            "h12" => Ok(Self::Hour12),
            "d1" | "daily" => Ok(Self::Day1),
            other => Err(format!("unknown interval: {other}")),
        }
    }
}
