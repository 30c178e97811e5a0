//! Money helpers.
//!
//! Prices travel as JSON numbers; arithmetic is done on `Decimal` and rounded
//! half-up to cents before display or storage.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::errors::ValidationError;

const DECIMAL_PLACES: u32 = 2;

/// Upper bound accepted for a single menu price.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Rounds to cents, half away from zero.
#[must_use]
pub fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Parses a price typed by an operator.
///
/// # Errors
/// Returns error if the text is blank, not a number, negative or above
/// [`MAX_PRICE`].
pub fn parse_price(text: &str) -> Result<Decimal, ValidationError> {
    let trimmed = text.trim().trim_start_matches('$');
    if trimmed.is_empty() {
        return Err(ValidationError::required("price"));
    }

    let price: Decimal = trimmed
        .parse()
        .map_err(|_| ValidationError::invalid("price", format!("'{text}' is not a number")))?;

    if price.is_sign_negative() {
        return Err(ValidationError::invalid(
            "price",
            format!("must be non-negative, got {price}"),
        ));
    }
    if price > MAX_PRICE {
        return Err(ValidationError::invalid(
            "price",
            format!("exceeds maximum allowed ({MAX_PRICE})"),
        ));
    }

    Ok(price)
}

/// Formats an amount with two decimals and a currency symbol.
#[must_use]
pub fn format(symbol: &str, amount: Decimal) -> String {
    format!("{symbol}{:.2}", round(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("12.5", Decimal::new(125, 1) ; "decimal")]
    #[test_case(" 40 ", Decimal::from(40) ; "padded integer")]
    #[test_case("$3.99", Decimal::new(399, 2) ; "currency prefix")]
    #[test_case("0", Decimal::ZERO ; "free")]
    fn test_parse_price_accepts(text: &str, expected: Decimal) {
        assert_eq!(parse_price(text).unwrap(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("abc" ; "not a number")]
    #[test_case("-1" ; "negative")]
    #[test_case("1000001" ; "too large")]
    fn test_parse_price_rejects(text: &str) {
        assert!(parse_price(text).is_err());
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round(Decimal::new(1005, 3)), Decimal::new(101, 2));
        assert_eq!(round(Decimal::new(1004, 3)), Decimal::new(100, 2));
    }

    #[test]
    fn test_format() {
        assert_eq!(format("$", Decimal::new(5, 1)), "$0.50");
        assert_eq!(format("", Decimal::from(12)), "12.00");
    }
}
