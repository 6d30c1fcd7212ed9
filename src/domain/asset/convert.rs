//! Conversion: AssetResponse → Asset (TryFrom + validation).

use super::wire::AssetResponse;
use super::{Asset, ValidationError};
use crate::shared::{parse_price, AssetId};
use rust_decimal::Decimal;

fn optional_number(
    asset: &str,
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<Decimal>, ValidationError> {
    match raw {
        None => Ok(None),
        Some(value) => parse_price(&value)
            .map(Some)
            .ok_or_else(|| ValidationError::InvalidNumber {
                asset: asset.to_string(),
                field,
                value,
            }),
    }
}

impl TryFrom<AssetResponse> for Asset {
    type Error = ValidationError;

    fn try_from(source: AssetResponse) -> Result<Self, Self::Error> {
        if source.id.trim().is_empty() {
            return Err(ValidationError::MissingId);
        }
        let id = source.id;

        let rank = source
            .rank
            .trim()
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidNumber {
                asset: id.clone(),
                field: "rank",
                value: source.rank.clone(),
            })?;

        let price_raw = source
            .price_usd
            .ok_or_else(|| ValidationError::MissingPrice(id.clone()))?;
        let price_usd = parse_price(&price_raw).ok_or_else(|| ValidationError::InvalidNumber {
            asset: id.clone(),
            field: "priceUsd",
            value: price_raw.clone(),
        })?;

        let change_percent_24h =
            optional_number(&id, "changePercent24Hr", source.change_percent_24_hr)?;
        let market_cap_usd = optional_number(&id, "marketCapUsd", source.market_cap_usd)?;

        Ok(Asset {
            id: AssetId::from(id),
            rank,
            symbol: source.symbol,
            name: source.name,
            price_usd,
            change_percent_24h,
            market_cap_usd,
        })
    }
}

/// Validate a listing. Invalid records are logged and skipped.
pub(crate) fn assets_from_wire(records: Vec<AssetResponse>) -> Vec<Asset> {
    records
        .into_iter()
        .filter_map(|record| match Asset::try_from(record) {
            Ok(asset) => Some(asset),
            Err(e) => {
                tracing::warn!("Skipping invalid asset record: {}", e);
                None
            }
        })
        .collect()
}
