//! pt-BR numeric codec for monetary amounts and percentages.
//!
//! Parsing is lenient: currency symbols, spaces and any other character
//! outside digits, `,`, `.` and `-` are discarded, and anything that still
//! fails to parse becomes `0.0`. Formatting is the display-side inverse:
//! `.` groups thousands and `,` separates decimals.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Thousands separator used when formatting.
pub const THOUSANDS_SEPARATOR: char = '.';

/// Decimal separator used when formatting.
pub const DECIMAL_SEPARATOR: char = ',';

/// Currency symbol prefixed by [`format_currency`].
pub const CURRENCY_SYMBOL: &str = "R$";

/// Fraction digits used by [`format_currency`].
pub const CURRENCY_FRACTION_DIGITS: usize = 2;

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a locale-formatted number, returning `0.0` for empty or unparsable input.
///
/// - With a comma present, dots are thousands separators and the comma is the
///   decimal point (`"1.234,56"` → `1234.56`).
/// - Without a comma but with several dots, only the last dot is the decimal
///   point (`"1.234.5"` → `1234.5`).
/// - Otherwise the remaining characters are parsed literally.
///
/// ```
/// use leadbook_core::locale_number::parse_locale_number;
///
/// assert_eq!(parse_locale_number("R$ 1.234,56"), 1234.56);
/// assert_eq!(parse_locale_number("not-a-number"), 0.0);
/// ```
pub fn parse_locale_number(input: &str) -> f64 {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replacen(',', ".", 1)
    } else {
        let parts: Vec<&str> = cleaned.split('.').collect();
        match parts.split_last() {
            Some((decimal, integer)) if parts.len() > 2 => {
                format!("{}.{}", integer.concat(), decimal)
            }
            _ => cleaned,
        }
    };

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Format `value` with a fixed number of fraction digits (`1234.5, 2` → `"1.234,50"`).
///
/// Non-finite input formats as zero. A value that rounds to zero never
/// carries a minus sign.
pub fn format_locale_number(value: f64, fraction_digits: usize) -> String {
    let (negative, digits) = fixed_digits(value, fraction_digits);
    if negative {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Format `value` as an amount in the local currency (`"R$ 1.234,56"`).
///
/// The symbol is separated by a no-break space, and negatives read `-R$ 10,00`.
pub fn format_currency(value: f64) -> String {
    let (negative, digits) = fixed_digits(value, CURRENCY_FRACTION_DIGITS);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{CURRENCY_SYMBOL}\u{a0}{digits}")
}

/// Unsigned grouped digits plus whether the rounded value is negative.
fn fixed_digits(value: f64, fraction_digits: usize) -> (bool, String) {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.*}", fraction_digits, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = group_thousands(integer);
    if let Some(fraction) = fraction {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(fraction);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    (value < 0.0 && !is_zero, out)
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- parse_locale_number --

    #[test]
    fn parses_grouped_amount_with_decimal_comma() {
        assert_eq!(parse_locale_number("1.234,56"), 1234.56);
    }

    #[test]
    fn parses_currency_prefixed_amount() {
        assert_eq!(parse_locale_number("R$ 1.234,56"), 1234.56);
        assert_eq!(parse_locale_number("R$\u{a0}1.234,56"), 1234.56);
    }

    #[test]
    fn parses_negative_amount() {
        assert_eq!(parse_locale_number("-1.234,56"), -1234.56);
        assert_eq!(parse_locale_number("-R$ 10,00"), -10.0);
    }

    #[test]
    fn empty_and_garbage_yield_zero() {
        assert_eq!(parse_locale_number(""), 0.0);
        assert_eq!(parse_locale_number("   "), 0.0);
        assert_eq!(parse_locale_number("not-a-number"), 0.0);
        assert_eq!(parse_locale_number("R$"), 0.0);
        assert_eq!(parse_locale_number("1,2,3"), 0.0);
    }

    #[test]
    fn multiple_dots_keep_only_last_as_decimal() {
        assert_eq!(parse_locale_number("1.234.567"), 1234.567);
        assert_eq!(parse_locale_number("1.234.5"), 1234.5);
    }

    #[test]
    fn single_dot_is_literal_decimal() {
        assert_eq!(parse_locale_number("12.5"), 12.5);
        assert_eq!(parse_locale_number("10"), 10.0);
    }

    #[test]
    fn percentages_parse_as_scalars() {
        assert_eq!(parse_locale_number("10,5 %"), 10.5);
    }

    // -- format_locale_number / format_currency --

    #[test]
    fn formats_with_grouping_and_decimal_comma() {
        assert_eq!(format_locale_number(1234.5, 2), "1.234,50");
        assert_eq!(format_locale_number(1234567.891, 2), "1.234.567,89");
        assert_eq!(format_locale_number(12.0, 0), "12");
        assert_eq!(format_locale_number(999.0, 1), "999,0");
    }

    #[test]
    fn formats_negative_and_rounded_zero() {
        assert_eq!(format_locale_number(-1234.56, 2), "-1.234,56");
        assert_eq!(format_locale_number(-0.001, 2), "0,00");
    }

    #[test]
    fn non_finite_formats_as_zero() {
        assert_eq!(format_locale_number(f64::NAN, 2), "0,00");
        assert_eq!(format_currency(f64::INFINITY), "R$\u{a0}0,00");
    }

    #[test]
    fn formats_currency() {
        assert_eq!(format_currency(1234.56), "R$\u{a0}1.234,56");
        assert_eq!(format_currency(-10.0), "-R$\u{a0}10,00");
    }

    #[test]
    fn format_then_parse_round_trips() {
        let amounts = [
            0.0,
            0.01,
            1.5,
            999.99,
            1000.0,
            1234.56,
            -1234.56,
            98765.4321,
            1_000_000.0,
            123_456_789.12,
        ];
        for amount in amounts {
            let formatted = format_locale_number(amount, 2);
            let parsed = parse_locale_number(&formatted);
            assert!(
                (parsed - amount).abs() <= 1e-2,
                "{amount} formatted as {formatted} parsed back as {parsed}"
            );

            let currency = parse_locale_number(&format_currency(amount));
            assert!((currency - amount).abs() <= 1e-2);
        }
    }
}
