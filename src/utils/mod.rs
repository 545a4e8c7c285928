//! Utility functions for formatting and parsing Brazilian-locale numbers
//!
//! Display values follow pt-BR conventions ("R$ 1.234,56", "12,50%");
//! user input is accepted in either pt-BR or plain notation.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::CalculatorError;

/// Currency symbol options for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbol {
    /// Include "R$ " prefix (Brazilian Real)
    BRL,
    /// No currency symbol (percentages, table cells)
    None,
}

/// Core formatting function with full control over output.
///
/// Formats a Decimal rounded half away from zero to 2 places, using
/// `.` as thousands separator and `,` as decimal separator.
///
/// # Examples
/// ```
/// use rendafixa::utils::{format_currency_with_width, CurrencySymbol};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234.56), 0, CurrencySymbol::BRL),
///     "R$ 1.234,56"
/// );
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234), 15, CurrencySymbol::None),
///     "       1.234,00"
/// );
/// ```
pub fn format_currency_with_width(value: Decimal, width: usize, symbol: CurrencySymbol) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let is_negative = rounded < Decimal::ZERO;

    let formatted = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let digits: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    let sign = if is_negative { "-" } else { "" };
    let prefix = match symbol {
        CurrencySymbol::BRL => "R$ ",
        CurrencySymbol::None => "",
    };

    let result = format!("{}{}{},{}", prefix, sign, grouped, decimal_part);

    if width > 0 && result.chars().count() < width {
        format!("{:>width$}", result, width = width)
    } else {
        result
    }
}

/// Format as Brazilian Real with symbol: "R$ 1.234,56"
///
/// # Examples
/// ```
/// use rendafixa::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(1234.5)), "R$ 1.234,50");
/// assert_eq!(format_currency(dec!(-500)), "R$ -500,00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::BRL)
}

/// Format number only (no symbol): "1.234,56"
pub fn format_decimal_br(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::None)
}

/// Format a percentage value (already scaled by 100): "12,34%"
pub fn format_percent(pct: Decimal) -> String {
    format!("{}%", format_decimal_br(pct))
}

/// Format a rate fraction as a percentage: 0.175 -> "17,50%"
pub fn format_rate(fraction: Decimal) -> String {
    format_percent(fraction * Decimal::ONE_HUNDRED)
}

/// Parse a user-supplied number in pt-BR or plain notation.
///
/// With a comma present, `.` is a thousands separator ("1.234,56").
/// Without one, `.` is the decimal point ("1234.56"). "R$" and "%" are ignored.
pub fn parse_decimal_br(input: &str) -> Result<Decimal, CalculatorError> {
    let stripped = input.trim().replace("R$", "").replace(['%', ' '], "");
    let cleaned = if stripped.contains(',') {
        stripped.replace('.', "").replace(',', ".")
    } else {
        stripped
    };
    if cleaned.is_empty() {
        return Err(CalculatorError::ParseError("empty number".to_string()));
    }
    Decimal::from_str(&cleaned)
        .map_err(|err| CalculatorError::ParseError(format!("invalid number '{}': {}", input, err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency_basic() {
        assert_eq!(format_currency(dec!(1234.56)), "R$ 1.234,56");
        assert_eq!(format_currency(dec!(1234.5)), "R$ 1.234,50");
        assert_eq!(format_currency(dec!(0.99)), "R$ 0,99");
        assert_eq!(format_currency(dec!(1000000)), "R$ 1.000.000,00");
    }

    #[test]
    fn test_format_currency_grouping() {
        assert_eq!(format_currency(dec!(0)), "R$ 0,00");
        assert_eq!(format_currency(dec!(123)), "R$ 123,00");
        assert_eq!(format_currency(dec!(1000)), "R$ 1.000,00");
        assert_eq!(format_currency(dec!(12345)), "R$ 12.345,00");
        assert_eq!(format_currency(dec!(123456)), "R$ 123.456,00");
        assert_eq!(format_currency(dec!(12345678.90)), "R$ 12.345.678,90");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(dec!(-1234.56)), "R$ -1.234,56");
        assert_eq!(format_currency(dec!(-0.01)), "R$ -0,01");
        // rounds to zero, so no sign
        assert_eq!(format_currency(dec!(-0.001)), "R$ 0,00");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(format_currency(dec!(1.005)), "R$ 1,01");
        assert_eq!(format_currency(dec!(1.004)), "R$ 1,00");
        assert_eq!(format_currency(dec!(999.995)), "R$ 1.000,00");
        assert_eq!(format_currency(dec!(1082.4999999)), "R$ 1.082,50");
    }

    #[test]
    fn test_format_with_width() {
        let result = format_currency_with_width(dec!(100), 15, CurrencySymbol::BRL);
        assert_eq!(result, "      R$ 100,00");

        let no_pad = format_currency_with_width(dec!(1000000), 5, CurrencySymbol::BRL);
        assert_eq!(no_pad, "R$ 1.000.000,00");
    }

    #[test]
    fn test_format_percent_and_rate() {
        assert_eq!(format_percent(dec!(8.25)), "8,25%");
        assert_eq!(format_rate(dec!(0.175)), "17,50%");
        assert_eq!(format_rate(dec!(0.225)), "22,50%");
    }

    #[test]
    fn test_parse_decimal_br() {
        assert_eq!(parse_decimal_br("1.234,56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal_br("R$ 1.000,00").unwrap(), dec!(1000));
        assert_eq!(parse_decimal_br("13,75%").unwrap(), dec!(13.75));
        assert_eq!(parse_decimal_br("1234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal_br("110").unwrap(), dec!(110));
        assert!(parse_decimal_br("").is_err());
        assert!(parse_decimal_br("abc").is_err());
    }
}
