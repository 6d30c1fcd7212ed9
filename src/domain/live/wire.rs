//! Wire format of feed messages: a flat JSON object of asset id → price.
//!
//! ```json
//! {"bitcoin":"51000.12","ethereum":"3012.5"}
//! ```

use super::PriceUpdate;
use crate::error::ParseError;
use crate::shared::{parse_price, AssetId};
use serde_json::Value;
use std::collections::HashMap;

pub type PriceMessage = HashMap<String, Value>;

impl PriceUpdate {
    /// Parse a feed message.
    ///
    /// A message that is not a JSON object fails as a whole. Inside a valid
    /// object, entries whose value is not a number (or numeric string) are
    /// returned separately and left out of the update.
    pub fn parse(text: &str) -> Result<(PriceUpdate, Vec<ParseError>), ParseError> {
        let message: PriceMessage = serde_json::from_str(text)?;
        let mut update = PriceUpdate::default();
        let mut rejected = Vec::new();

        for (asset, value) in message {
            let parsed = match &value {
                Value::String(s) => parse_price(s),
                Value::Number(n) => parse_price(&n.to_string()),
                _ => None,
            };
            match parsed {
                Some(price) => {
                    update.prices.insert(AssetId::from(asset), price);
                }
                None => rejected.push(ParseError::Price {
                    asset,
                    value: value.to_string(),
                }),
            }
        }

        Ok((update, rejected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_parse_string_prices() {
        let (update, rejected) =
            PriceUpdate::parse(r#"{"bitcoin":"51000.00","ethereum":"3000.5"}"#).unwrap();
        assert!(rejected.is_empty());
        assert_eq!(update.len(), 2);
        assert_eq!(update.get("bitcoin"), Some(Decimal::new(5_100_000, 2)));
        assert_eq!(update.get("ethereum"), Some(Decimal::new(30_005, 1)));
    }

    #[test]
    fn test_parse_numeric_prices() {
        let (update, _) = PriceUpdate::parse(r#"{"dogecoin":0.08}"#).unwrap();
        assert_eq!(update.get("dogecoin"), Some(Decimal::new(8, 2)));
    }

    #[test]
    fn test_bad_entries_rejected_individually() {
        let (update, rejected) =
            PriceUpdate::parse(r#"{"bitcoin":"51000","broken":"n/a","nullish":null}"#).unwrap();
        assert_eq!(update.len(), 1);
        assert_eq!(rejected.len(), 2);
        assert!(rejected
            .iter()
            .all(|e| matches!(e, ParseError::Price { .. })));
    }

    #[test]
    fn test_non_object_message_fails() {
        assert!(matches!(
            PriceUpdate::parse("[1,2,3]"),
            Err(ParseError::Message(_))
        ));
        assert!(matches!(
            PriceUpdate::parse("not json"),
            Err(ParseError::Message(_))
        ));
    }

    #[test]
    fn test_empty_object_is_empty_update() {
        let (update, rejected) = PriceUpdate::parse("{}").unwrap();
        assert!(update.is_empty());
        assert!(rejected.is_empty());
    }
}
