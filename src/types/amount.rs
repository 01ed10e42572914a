use crate::types::errors::AmountError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a signed `TRNAMT` value into an exact decimal.
///
/// Accepts an optional leading `+` and a single `,` in place of the decimal point, which
/// some European institutions emit. Thousands separators are rejected.
pub fn parse_amount(value: &str) -> Result<Decimal, AmountError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(AmountError::InvalidFormat("Value is an empty string".to_string()));
    }

    let unsigned = value.strip_prefix('+').unwrap_or(value);

    let commas = unsigned.matches(',').count();
    let points = unsigned.matches('.').count();

    if commas + points > 1 {
        return Err(AmountError::InvalidFormat(format!("Value '{value}' has more than one decimal separator")));
    }

    let canonical = if commas == 1 {
        unsigned.replace(',', ".")
    } else {
        unsigned.to_string()
    };

    if !canonical.bytes().enumerate().all(|(position, byte)| byte.is_ascii_digit() || byte == b'.' || (position == 0 && byte == b'-')) {
        return Err(AmountError::InvalidFormat(format!("Value '{value}' contains invalid characters")));
    }

    if !canonical.bytes().any(|byte| byte.is_ascii_digit()) {
        return Err(AmountError::InvalidFormat(format!("Value '{value}' has no digits")));
    }

    Decimal::from_str(&canonical)
        .map_err(|error| AmountError::InvalidFormat(format!("Value '{value}' is not a decimal: {error}")))
}
