//! Display formatting for amounts and rates.
//!
//! Amounts render rounded to whole units with digits grouped in threes
//! (`.` separator) and a trailing currency code: `1.234.567 TRY`. Values
//! that have no meaningful numeric rendering (unbounded bracket bounds, the
//! zero-income effective rate, non-positive derived amounts in the bracket
//! table) render as the `-` sentinel instead.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency code appended to formatted amounts.
pub const DEFAULT_CURRENCY: &str = "TRY";

/// Rendered in place of values with no numeric representation.
pub const SENTINEL: &str = "-";

const THOUSANDS_SEPARATOR: char = '.';

/// Rounds to whole units using half-up (away from zero) rounding.
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as grouped whole units with a currency suffix.
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let rounded = round_whole(amount);
    let digits = rounded.abs().normalize().to_string();
    let grouped = group_digits(&digits);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped} {currency}")
    } else {
        format!("{grouped} {currency}")
    }
}

/// Formats an optional amount; `None` renders the sentinel.
pub fn format_opt_amount(amount: Option<Decimal>, currency: &str) -> String {
    match amount {
        Some(amount) => format_amount(amount, currency),
        None => SENTINEL.to_string(),
    }
}

/// Formats a derived amount for the bracket results table, where zero and
/// negative values render the sentinel.
pub fn format_amount_or_dash(amount: Decimal, currency: &str) -> String {
    if amount <= Decimal::ZERO {
        SENTINEL.to_string()
    } else {
        format_amount(amount, currency)
    }
}

/// Formats a fractional rate as an integer-rounded percentage: `%20`.
pub fn format_rate(rate: Decimal) -> String {
    let percent = round_whole(rate * Decimal::ONE_HUNDRED).normalize();
    format!("%{percent}")
}

/// Formats an optional rate; `None` (the zero-income case) renders the
/// sentinel.
pub fn format_opt_rate(rate: Option<Decimal>) -> String {
    match rate {
        Some(rate) => format_rate(rate),
        None => SENTINEL.to_string(),
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn format_amount_groups_digits() {
        assert_eq!(format_amount(dec!(0), "TRY"), "0 TRY");
        assert_eq!(format_amount(dec!(100), "TRY"), "100 TRY");
        assert_eq!(format_amount(dec!(1000), "TRY"), "1.000 TRY");
        assert_eq!(format_amount(dec!(32000), "TRY"), "32.000 TRY");
        assert_eq!(format_amount(dec!(1234567), "TRY"), "1.234.567 TRY");
    }

    #[test]
    fn format_amount_rounds_to_whole_units() {
        assert_eq!(format_amount(dec!(999.4), "TRY"), "999 TRY");
        assert_eq!(format_amount(dec!(999.5), "TRY"), "1.000 TRY");
        assert_eq!(format_amount(dec!(20500.25), "TRY"), "20.500 TRY");
    }

    #[test]
    fn format_amount_keeps_negative_sign() {
        assert_eq!(format_amount(dec!(-4800), "TRY"), "-4.800 TRY");
        assert_eq!(format_amount(dec!(-1234567.8), "TRY"), "-1.234.568 TRY");
    }

    #[test]
    fn format_amount_never_renders_negative_zero() {
        assert_eq!(format_amount(dec!(-0.4), "TRY"), "0 TRY");
    }

    #[test]
    fn format_opt_amount_sentinel_for_none() {
        assert_eq!(format_opt_amount(None, "TRY"), "-");
        assert_eq!(format_opt_amount(Some(dec!(70000)), "TRY"), "70.000 TRY");
    }

    #[test]
    fn format_amount_or_dash_hides_non_positive() {
        assert_eq!(format_amount_or_dash(dec!(0), "TRY"), "-");
        assert_eq!(format_amount_or_dash(dec!(-5), "TRY"), "-");
        assert_eq!(format_amount_or_dash(dec!(4800), "TRY"), "4.800 TRY");
    }

    #[test]
    fn format_rate_rounds_to_integer_percent() {
        assert_eq!(format_rate(dec!(0.15)), "%15");
        assert_eq!(format_rate(dec!(0.4)), "%40");
        assert_eq!(format_rate(dec!(0.205)), "%21");
        assert_eq!(format_rate(dec!(0)), "%0");
    }

    #[test]
    fn format_opt_rate_sentinel_for_none() {
        assert_eq!(format_opt_rate(None), "-");
        assert_eq!(format_opt_rate(Some(dec!(0.2))), "%20");
    }
}
