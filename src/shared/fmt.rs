//! Number formatting for human-readable display.

use rust_decimal::prelude::*;

/// Trims trailing zeros, adds thousands separators.
pub fn group_thousands(formatted: &str) -> String {
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted
    };

    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };

    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Locale-style grouping with at most `max_decimals` fractional digits.
///
/// `1234567.891234` with 3 → `"1,234,567.891"`.
pub fn display_grouped(value: Decimal, max_decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(max_decimals, RoundingStrategy::MidpointAwayFromZero);
    group_thousands(&rounded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_group_thousands_integers() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567890"), "1,234,567,890");
    }

    #[test]
    fn test_group_thousands_trims_fraction() {
        assert_eq!(group_thousands("1.50"), "1.5");
        assert_eq!(group_thousands("1000.00"), "1,000");
        assert_eq!(group_thousands("-1234.56"), "-1,234.56");
        assert_eq!(group_thousands("-100"), "-100");
    }

    #[test]
    fn test_display_grouped_market_cap() {
        let cap = Decimal::from_str("985432123456.78901").unwrap();
        assert_eq!(display_grouped(cap, 3), "985,432,123,456.789");
        assert_eq!(display_grouped(Decimal::new(1_000_000, 0), 3), "1,000,000");
    }
}
