//! Currency helpers shared by the lending engines.
//!
//! Request records carry plain `f64` amounts; everything rounding-sensitive happens on
//! [`Decimal`] after [`amount`] has screened the raw value.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::lending::EngineError;

/// Largest magnitude accepted for any currency input.
pub const MAX_CURRENCY_AMOUNT: f64 = 1_000_000_000_000.0;

/// Converts a raw request amount into a [`Decimal`], rejecting NaN, infinities, and
/// magnitudes beyond [`MAX_CURRENCY_AMOUNT`].
pub fn amount(field: &'static str, value: f64) -> Result<Decimal, EngineError> {
    if !value.is_finite() {
        return Err(EngineError::NonFinite { field });
    }
    if value.abs() > MAX_CURRENCY_AMOUNT {
        return Err(EngineError::AmountOutOfRange {
            field,
            value,
            limit: MAX_CURRENCY_AMOUNT,
        });
    }
    Decimal::from_f64(value).ok_or(EngineError::NonFinite { field })
}

/// Rounds to paise/cents with round-half-up semantics.
pub fn round_currency(value: Decimal) -> Decimal {
    round_to(value, 2)
}

pub fn round_to(value: Decimal, places: u32) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Divides two engine quantities, reporting overflow instead of panicking.
pub fn ratio(
    numerator: Decimal,
    denominator: Decimal,
    operation: &'static str,
) -> Result<Decimal, EngineError> {
    numerator
        .checked_div(denominator)
        .ok_or(EngineError::NumericOverflow { operation })
}

pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Formats an amount as whole rupees with thousands separators, e.g. `₹120,000`.
pub fn format_rupees(value: Decimal) -> String {
    let rounded = round_to(value, 0);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}
