//! Common helpers shared by the calculators.
//!
//! Amount validation lives here so every entry point rejects the same inputs.
//! The rounding and percentage helpers are for display only; the calculators
//! never round.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while calculating tax.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// The base amount is negative, not finite, or too large to represent.
    #[error("invalid base amount: {0}")]
    InvalidAmount(String),
}

/// Checks that a decimal base amount is usable.
///
/// # Errors
///
/// Returns [`CalculationError::InvalidAmount`] for negative amounts.
pub fn validate_amount(amount: Decimal) -> Result<Decimal, CalculationError> {
    if amount < Decimal::ZERO {
        warn!(amount = %amount, "rejecting negative base amount");
        return Err(CalculationError::InvalidAmount(amount.to_string()));
    }
    Ok(amount)
}

/// Converts a floating-point base amount into a validated decimal.
///
/// # Errors
///
/// Returns [`CalculationError::InvalidAmount`] for `NaN`, infinities,
/// negative values and values outside the decimal range. Non-zero amounts
/// smaller than the finest decimal step (1e-28) are rejected rather than
/// silently becoming zero. `-0.0` is treated as zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use reform_core::calculations::common::amount_from_f64;
///
/// assert_eq!(amount_from_f64(1000.0), Ok(dec!(1000)));
/// assert!(amount_from_f64(f64::NAN).is_err());
/// assert!(amount_from_f64(-50.0).is_err());
/// assert!(amount_from_f64(1e-30).is_err());
/// ```
pub fn amount_from_f64(amount: f64) -> Result<Decimal, CalculationError> {
    if !amount.is_finite() {
        warn!(amount, "rejecting non-finite base amount");
        return Err(CalculationError::InvalidAmount(amount.to_string()));
    }
    if amount == 0.0 {
        return Ok(Decimal::ZERO);
    }
    let decimal = Decimal::from_f64(amount).ok_or_else(|| {
        warn!(amount, "base amount is outside the decimal range");
        CalculationError::InvalidAmount(amount.to_string())
    })?;
    if decimal.is_zero() {
        warn!(amount, "base amount is below decimal precision");
        return Err(CalculationError::InvalidAmount(amount.to_string()));
    }
    validate_amount(decimal)
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use reform_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(3.604)), dec!(3.60));
/// assert_eq!(round_half_up(dec!(3.605)), dec!(3.61));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a fractional rate into a percentage (`0.0036` becomes `0.36`).
pub fn as_percentage(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}
