//! Conversion: HistoryPointResponse → AssetHistoryPoint.

use super::wire::HistoryPointResponse;
use super::AssetHistoryPoint;
use crate::domain::asset::ValidationError;
use crate::shared::parse_price;

impl TryFrom<HistoryPointResponse> for AssetHistoryPoint {
    type Error = ValidationError;

    fn try_from(source: HistoryPointResponse) -> Result<Self, Self::Error> {
        let price_usd =
            parse_price(&source.price_usd).ok_or_else(|| ValidationError::InvalidNumber {
                asset: source.date.clone(),
                field: "priceUsd",
                value: source.price_usd.clone(),
            })?;
        Ok(AssetHistoryPoint {
            price_usd,
            time: source.time,
            date: source.date,
        })
    }
}

/// Validate a series and order it by time ascending. Invalid points are
/// logged and skipped.
pub fn history_from_wire(records: Vec<HistoryPointResponse>) -> Vec<AssetHistoryPoint> {
    let mut points: Vec<_> = records
        .into_iter()
        .filter_map(|record| match AssetHistoryPoint::try_from(record) {
            Ok(point) => Some(point),
            Err(e) => {
                tracing::warn!("Skipping invalid history point: {}", e);
                None
            }
        })
        .collect();
    points.sort_by_key(|p| p.time);
    points
}
