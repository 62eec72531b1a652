use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Monetary quantity: balances, limits and operation amounts.
pub type Amount = Decimal;

/// Parses a plain decimal literal such as `-12.50` or `800`.
///
/// Scientific notation and thousands separators are rejected.
pub fn parse_amount(s: &str) -> Option<Amount> {
    let s = s.trim();
    if s.is_empty() || s.contains(['e', 'E', '_', ',']) {
        return None;
    }
    Decimal::from_str(s).ok()
}

/// serde helper for optional amount columns; an empty column is `None`.
pub fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<Amount>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_amount(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid amount format: {}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_amount;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_signed_decimals() {
        assert_eq!(parse_amount("800"), Some(dec!(800)));
        assert_eq!(parse_amount(" 100.0003 "), Some(dec!(100.0003)));
        assert_eq!(parse_amount("-12.5"), Some(dec!(-12.5)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("1e3"), None);
        assert_eq!(parse_amount("1,000"), None);
        assert_eq!(parse_amount("1.2.3"), None);
    }
}
