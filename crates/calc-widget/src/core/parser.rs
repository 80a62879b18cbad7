//! Operand parsing
//!
//! The input box holds a single numeric literal. Thousands separators are
//! tolerated, everything else goes through the standard `f64` parser.

use crate::core::{CalcError, CalcResult};

/// Thousands separator stripped before conversion
pub const THOUSANDS_SEPARATOR: char = ',';

/// Parses raw input text into a finite operand.
///
/// Surrounding whitespace is trimmed and every comma removed before the
/// literal is converted. Empty text, text that does not parse and non-finite
/// values (`inf`, `NaN`, overflowing exponents) are all [`CalcError::InvalidInput`].
///
/// ```rust
/// use calc_widget::core::parse_operand;
///
/// assert_eq!(parse_operand(" 1,234.5 "), Ok(1234.5));
/// assert!(parse_operand("abc").is_err());
/// ```
pub fn parse_operand(text: &str) -> CalcResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalcError::InvalidInput);
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|&c| c != THOUSANDS_SEPARATOR)
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(CalcError::InvalidInput);
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::InvalidInput),
    }
}

/// Returns true if `text` parses to a finite operand
#[must_use]
pub fn is_valid_operand(text: &str) -> bool {
    parse_operand(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ===== Accepted literals =====

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_operand("5"), Ok(5.0));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_operand("2.5"), Ok(2.5));
    }

    #[test]
    fn test_parse_signs() {
        assert_eq!(parse_operand("-3"), Ok(-3.0));
        assert_eq!(parse_operand("+3"), Ok(3.0));
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(parse_operand("1e3"), Ok(1000.0));
        assert_eq!(parse_operand("2.5E-1"), Ok(0.25));
    }

    #[test]
    fn test_parse_bare_fraction() {
        assert_eq!(parse_operand(".5"), Ok(0.5));
        assert_eq!(parse_operand("5."), Ok(5.0));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_operand("  42\t\n"), Ok(42.0));
    }

    #[test]
    fn test_parse_strips_commas() {
        assert_eq!(parse_operand("1,234.5"), Ok(1234.5));
        assert_eq!(parse_operand("1,000,000"), Ok(1_000_000.0));
    }

    #[test]
    fn test_parse_comma_before_whitespace() {
        assert_eq!(parse_operand("5 ,"), Ok(5.0));
    }

    #[test]
    fn test_parse_zero_is_valid() {
        assert_eq!(parse_operand("0"), Ok(0.0));
        assert_eq!(parse_operand("-0"), Ok(0.0));
    }

    // ===== Rejected literals =====

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_operand(""), Err(CalcError::InvalidInput));
    }

    #[test]
    fn test_parse_whitespace_only() {
        assert_eq!(parse_operand("   "), Err(CalcError::InvalidInput));
    }

    #[test]
    fn test_parse_commas_only() {
        assert_eq!(parse_operand(",,,"), Err(CalcError::InvalidInput));
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(parse_operand("abc"), Err(CalcError::InvalidInput));
        assert_eq!(parse_operand("12abc"), Err(CalcError::InvalidInput));
    }

    #[test]
    fn test_parse_expression_rejected() {
        assert_eq!(parse_operand("1 + 2"), Err(CalcError::InvalidInput));
    }

    #[test]
    fn test_parse_non_finite_rejected() {
        assert_eq!(parse_operand("inf"), Err(CalcError::InvalidInput));
        assert_eq!(parse_operand("-infinity"), Err(CalcError::InvalidInput));
        assert_eq!(parse_operand("NaN"), Err(CalcError::InvalidInput));
        assert_eq!(parse_operand("1e400"), Err(CalcError::InvalidInput));
    }

    #[test]
    fn test_is_valid_operand() {
        assert!(is_valid_operand("7"));
        assert!(!is_valid_operand("seven"));
    }

    proptest! {
        #[test]
        fn prop_integers_parse_exactly(n in -1_000_000_000i64..1_000_000_000i64) {
            prop_assert_eq!(parse_operand(&n.to_string()), Ok(n as f64));
        }

        #[test]
        fn prop_alphabetic_input_is_invalid(s in "[a-zA-Z]{1,12}") {
            // `inf`, `infinity` and `nan` parse but are non-finite
            prop_assert_eq!(parse_operand(&s), Err(CalcError::InvalidInput));
        }

        #[test]
        fn prop_parser_never_yields_non_finite(s in "\\PC{0,24}") {
            if let Ok(v) = parse_operand(&s) {
                prop_assert!(v.is_finite());
            }
        }
    }
}
