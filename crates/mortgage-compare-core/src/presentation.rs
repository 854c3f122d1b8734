//! Display strings for amounts. Output of these helpers is for people only
//! and is never parsed back into a calculation.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Money, Side};

/// Whole-unit currency string, e.g. `$1,439` or `-$20`.
pub fn format_currency(amount: Money) -> String {
    format_with_places(amount, 0)
}

/// Cent-precision currency string, e.g. `$1,438.92`.
pub fn format_currency_precise(amount: Money) -> String {
    format_with_places(amount, 2)
}

/// Caption naming the cheaper side, e.g. `(B saves $523/mo vs A)`.
pub fn savings_caption(cheaper: Side, monthly_savings: Money) -> String {
    format!(
        "({cheaper} saves {}/mo vs {})",
        format_currency(monthly_savings),
        cheaper.other()
    )
}

fn format_with_places(amount: Money, places: u32) -> String {
    let mut rounded = amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let (whole, fraction) = match digits.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + 4);
    if negative {
        out.push('-');
    }
    out.push('$');
    out.push_str(&group_thousands(whole));
    if let Some(f) = fraction {
        out.push('.');
        out.push_str(f);
    }
    out
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Signed percentage with one decimal place, e.g. `115.8%`.
pub fn format_percent(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    format!("{rounded}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_whole_dollars() {
        assert_eq!(format_currency(dec!(1438.92)), "$1,439");
        assert_eq!(format_currency(dec!(240000)), "$240,000");
        assert_eq!(format_currency(dec!(999.5)), "$1,000");
        assert_eq!(format_currency(dec!(12)), "$12");
        assert_eq!(format_currency(dec!(1234567.4)), "$1,234,567");
    }

    #[test]
    fn test_cents() {
        assert_eq!(format_currency_precise(dec!(1438.921260)), "$1,438.92");
        assert_eq!(format_currency_precise(dec!(5)), "$5.00");
        assert_eq!(format_currency_precise(dec!(0.005)), "$0.01");
    }

    #[test]
    fn test_negative_and_zero() {
        assert_eq!(format_currency(dec!(-20.4)), "-$20");
        assert_eq!(format_currency(dec!(-0.2)), "$0");
        assert_eq!(format_currency_precise(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_savings_caption() {
        assert_eq!(savings_caption(Side::B, dec!(523.4)), "(B saves $523/mo vs A)");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(dec!(115.838)), "115.8%");
        assert_eq!(format_percent(dec!(20)), "20.0%");
    }
}
