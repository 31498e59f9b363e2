//! Number formatting for display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount as a whole number with thousands separators.
///
/// # Examples
///
/// ```
/// use raise_engine::report::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(1_000_000, 0)), "1,000,000");
/// assert_eq!(format_amount(Decimal::new(-50_000, 0)), "-50,000");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    let digits = rounded.abs().trunc().to_string();
    let grouped = group_thousands(&digits);
    if rounded < Decimal::ZERO {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formats an amount with an explicit sign, e.g. `+300,000`.
pub fn format_signed_amount(amount: Decimal) -> String {
    let formatted = format_amount(amount);
    if formatted.starts_with('-') {
        formatted
    } else {
        format!("+{}", formatted)
    }
}

/// Formats a fractional rate as a percentage with two decimals.
///
/// # Examples
///
/// ```
/// use raise_engine::report::format_percent;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_percent(Decimal::new(5, 2)), "5.00%");
/// ```
pub fn format_percent(rate: Decimal) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    format!("{:.2}%", percent)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(dec("0")), "0");
        assert_eq!(format_amount(dec("999")), "999");
        assert_eq!(format_amount(dec("1000")), "1,000");
        assert_eq!(format_amount(dec("6300000")), "6,300,000");
        assert_eq!(format_amount(dec("123456789")), "123,456,789");
    }

    #[test]
    fn test_format_amount_rounds_fractions() {
        assert_eq!(format_amount(dec("1275.56")), "1,276");
        assert_eq!(format_amount(dec("2.5")), "2");
    }

    #[test]
    fn test_format_amount_negative() {
        assert_eq!(format_amount(dec("-50000")), "-50,000");
        assert_eq!(format_amount(dec("-999")), "-999");
    }

    #[test]
    fn test_format_signed_amount() {
        assert_eq!(format_signed_amount(dec("300000")), "+300,000");
        assert_eq!(format_signed_amount(dec("0")), "+0");
        assert_eq!(format_signed_amount(dec("-25000")), "-25,000");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec("0.05")), "5.00%");
        assert_eq!(format_percent(dec("0.035")), "3.50%");
        assert_eq!(format_percent(dec("0")), "0.00%");
        assert_eq!(format_percent(dec("1.5")), "150.00%");
        assert_eq!(format_percent(dec("0.12345")), "12.34%");
    }
}
