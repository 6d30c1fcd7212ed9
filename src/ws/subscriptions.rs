//! Subscription scope of a price feed.

use crate::shared::AssetId;

/// Which assets the feed streams prices for.
///
/// The scope is part of the connection URL; it cannot change on an open
/// connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FeedScope {
    /// Every asset the upstream tracks (`assets=ALL`).
    #[default]
    All,
    /// Only the listed assets.
    Assets(Vec<AssetId>),
}

impl FeedScope {
    /// Narrow scope for a single asset.
    pub fn single(id: AssetId) -> Self {
        FeedScope::Assets(vec![id])
    }

    /// Value of the `assets` query parameter. An empty list means `ALL`.
    pub fn query_value(&self) -> String {
        match self {
            FeedScope::Assets(ids) if !ids.is_empty() => ids
                .iter()
                .map(|id| urlencoding::encode(id.as_str()).into_owned())
                .collect::<Vec<_>>()
                .join(","),
            _ => "ALL".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_value() {
        assert_eq!(FeedScope::All.query_value(), "ALL");
        assert_eq!(FeedScope::Assets(vec![]).query_value(), "ALL");
        assert_eq!(
            FeedScope::single(AssetId::from("bitcoin")).query_value(),
            "bitcoin"
        );
        assert_eq!(
            FeedScope::Assets(vec![AssetId::from("a b"), AssetId::from("c")]).query_value(),
            "a%20b,c"
        );
    }
}
