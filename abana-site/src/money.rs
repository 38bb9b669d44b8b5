//! Money display helpers
//!
//! Amounts are `Decimal` throughout; these only format them. Two styles
//! exist because the storefront shows both: cart lines and totals print the
//! plain amount (`₦1500`), menu cards group thousands (`₦1,500`).

use rust_decimal::Decimal;

/// Currency symbol used when none is configured
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₦";

/// Plain amount, trailing zeros dropped: `₦1500`, `₦12.5`
pub fn format_amount(symbol: &str, amount: Decimal) -> String {
    format!("{}{}", symbol, amount.normalize())
}

/// Amount with the integer part grouped in thousands: `₦1,500`, `₦1,234,567.5`
pub fn format_grouped(symbol: &str, amount: Decimal) -> String {
    let text = amount.normalize().abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{}{}{}.{}", sign, symbol, grouped, f),
        None => format!("{}{}{}", sign, symbol, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("₦", d("1500")), "₦1500");
        assert_eq!(format_amount("₦", d("3000.00")), "₦3000");
        assert_eq!(format_amount("₦", d("12.50")), "₦12.5");
        assert_eq!(format_amount("₦", Decimal::ZERO), "₦0");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped("₦", d("1500")), "₦1,500");
        assert_eq!(format_grouped("₦", d("999")), "₦999");
        assert_eq!(format_grouped("₦", d("1234567.50")), "₦1,234,567.5");
        assert_eq!(format_grouped("₦", d("100000")), "₦100,000");
        assert_eq!(format_grouped("$", d("-2500")), "-$2,500");
    }
}
