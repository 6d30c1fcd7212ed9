//! Price reconciliation: snapshot price vs. live feed price.
//!
//! The displayed value is the live price when the feed has sent one for the
//! asset, otherwise the snapshot price. The trend always compares the live
//! price against the snapshot baseline, never against an earlier live tick.

use super::Asset;
use crate::domain::live::LivePriceMap;
use crate::shared::price::format_usd;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Direction of the live price relative to the snapshot price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    /// Equal to the snapshot, or no live price yet.
    Flat,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Flat => "=",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Flat => write!(f, "flat"),
        }
    }
}

/// The value shown for an asset together with its trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPrice {
    pub value: Decimal,
    pub trend: Trend,
    /// Whether `value` came from the live feed.
    pub is_live: bool,
}

impl DisplayPrice {
    /// `$51000.00`
    pub fn formatted(&self) -> String {
        format_usd(self.value)
    }
}

impl fmt::Display for DisplayPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.formatted(), self.trend.arrow())
    }
}

/// Merge a snapshot price with an optional live price.
pub fn reconcile(snapshot: Decimal, live: Option<Decimal>) -> DisplayPrice {
    match live {
        None => DisplayPrice {
            value: snapshot,
            trend: Trend::Flat,
            is_live: false,
        },
        Some(live) => DisplayPrice {
            value: live,
            trend: match live.cmp(&snapshot) {
                Ordering::Greater => Trend::Up,
                Ordering::Less => Trend::Down,
                Ordering::Equal => Trend::Flat,
            },
            is_live: true,
        },
    }
}

/// Displayed price and trend for `asset` given the current live prices.
pub fn display_price(asset: &Asset, live: &LivePriceMap) -> DisplayPrice {
    reconcile(asset.price_usd, live.get(&asset.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::live::PriceUpdate;
    use crate::shared::AssetId;
    use std::str::FromStr;

    fn bitcoin() -> Asset {
        Asset {
            id: AssetId::from("bitcoin"),
            rank: 1,
            symbol: "BTC".into(),
            name: "Bitcoin".into(),
            price_usd: Decimal::from_str("50000.00").unwrap(),
            change_percent_24h: None,
            market_cap_usd: None,
        }
    }

    fn live_with(message: &str) -> LivePriceMap {
        let mut map = LivePriceMap::new();
        let (update, rejected) = PriceUpdate::parse(message).unwrap();
        assert!(rejected.is_empty());
        map.merge(update);
        map
    }

    #[test]
    fn test_no_live_price_shows_snapshot_flat() {
        let price = display_price(&bitcoin(), &LivePriceMap::new());
        assert_eq!(price.value, bitcoin().price_usd);
        assert_eq!(price.trend, Trend::Flat);
        assert!(!price.is_live);
        assert_eq!(price.formatted(), "$50000.00");
    }

    #[test]
    fn test_live_price_above_snapshot_is_up() {
        let price = display_price(&bitcoin(), &live_with(r#"{"bitcoin":"51000.00"}"#));
        assert_eq!(price.formatted(), "$51000.00");
        assert_eq!(price.trend, Trend::Up);
        assert!(price.is_live);
    }

    #[test]
    fn test_live_price_below_snapshot_is_down() {
        let price = display_price(&bitcoin(), &live_with(r#"{"bitcoin":"49000.00"}"#));
        assert_eq!(price.formatted(), "$49000.00");
        assert_eq!(price.trend, Trend::Down);
    }

    #[test]
    fn test_equal_price_is_flat() {
        let price = display_price(&bitcoin(), &live_with(r#"{"bitcoin":"50000"}"#));
        assert_eq!(price.trend, Trend::Flat);
    }

    #[test]
    fn test_comparison_is_numeric_not_lexicographic() {
        // "9000" > "50000.00" as strings, but it is a drop.
        let price = display_price(&bitcoin(), &live_with(r#"{"bitcoin":"9000"}"#));
        assert_eq!(price.trend, Trend::Down);

        let mut small = bitcoin();
        small.price_usd = Decimal::from_str("0.5").unwrap();
        let price = display_price(&small, &live_with(r#"{"bitcoin":"10"}"#));
        assert_eq!(price.trend, Trend::Up);
    }

    #[test]
    fn test_other_assets_do_not_affect_price() {
        let price = display_price(&bitcoin(), &live_with(r#"{"ethereum":"99999"}"#));
        assert!(!price.is_live);
        assert_eq!(price.trend, Trend::Flat);
    }

    #[test]
    fn test_trend_relative_to_snapshot_not_previous_tick() {
        let mut map = live_with(r#"{"bitcoin":"52000"}"#);
        let (update, _) = PriceUpdate::parse(r#"{"bitcoin":"51000"}"#).unwrap();
        map.merge(update);
        // Lower than the previous tick, still above the snapshot.
        assert_eq!(display_price(&bitcoin(), &map).trend, Trend::Up);
    }

    #[test]
    fn test_reconcile_trend_matches_numeric_order() {
        let snapshot = Decimal::new(100, 0);
        for (live, expected) in [(99, Trend::Down), (100, Trend::Flat), (101, Trend::Up)] {
            let dp = reconcile(snapshot, Some(Decimal::new(live, 0)));
            assert_eq!(dp.trend, expected, "live {live}");
            assert_eq!(dp.value, Decimal::new(live, 0));
        }
    }

    #[test]
    fn test_display_includes_arrow() {
        let price = reconcile(Decimal::new(1, 0), Some(Decimal::new(2, 0)));
        assert_eq!(price.to_string(), "$2.00 ▲");
    }
}
