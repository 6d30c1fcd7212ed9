//! Price parsing and display.
//!
//! Upstream prices are decimal strings (`"50000.1234567890"`), occasionally in
//! exponent form for very small values (`"1.2e-7"`). Both sides of every trend
//! comparison go through [`parse_price`] so the comparison is numeric.

use rust_decimal::prelude::*;
use std::str::FromStr;

/// Parse an upstream price string into a `Decimal`.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Format a USD price with exactly two decimal places, prefixed with `$`.
pub fn format_usd(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("${}", rounded)
}

/// Lossy conversion for chart axes.
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
