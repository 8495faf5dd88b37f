//! CBS/IBS tax calculation for a single base amount.
//!
//! The calculation follows these steps:
//!
//! | Step | Value |
//! |------|-------|
//! | 1    | Effective component A rate: base A × (1 − reduction) |
//! | 2    | Effective component B rate: base B × (1 − reduction) |
//! | 3    | Tax per component: amount × effective rate |
//! | 4    | Total tax (A + B) and gross amount (amount + total tax) |
//! | 5    | Effective total rate: total tax ÷ amount |
//!
//! When the base amount is zero, step 5 reports the combined effective rate
//! instead of dividing by zero. No rounding is applied; callers round for
//! display with [`crate::calculations::common::round_half_up`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use reform_core::{RateRule, TaxCalculator};
//!
//! let rule = RateRule::new(dec!(0.009), dec!(0.001), dec!(0.5)).unwrap();
//! let result = TaxCalculator::new(rule).calculate(dec!(2000)).unwrap();
//!
//! assert_eq!(result.rate_component_a, dec!(0.0045));
//! assert_eq!(result.tax_component_a, dec!(9.0));
//! assert_eq!(result.tax_component_b, dec!(1.0));
//! assert_eq!(result.total_amount, dec!(2010));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{CalculationError, amount_from_f64, validate_amount};
use crate::rates::Resolution;
use crate::RateRule;

/// Outcome of applying one rate rule to one base amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The base amount the rates were applied to.
    pub amount_base: Decimal,

    /// Component A (CBS) rate after the reduction factor.
    pub rate_component_a: Decimal,

    /// Component B (IBS) rate after the reduction factor.
    pub rate_component_b: Decimal,

    /// `amount_base × rate_component_a`.
    pub tax_component_a: Decimal,

    /// `amount_base × rate_component_b`.
    pub tax_component_b: Decimal,

    /// Sum of both component taxes.
    pub total_tax: Decimal,

    /// Gross amount: `amount_base + total_tax`.
    pub total_amount: Decimal,

    /// `total_tax / amount_base`, or the combined effective rate when the
    /// base amount is zero.
    pub effective_total_rate: Decimal,

    /// Set when the requested code had no rate table entry and the zero-rate
    /// fallback was used. Distinguishes an unknown code from an exempt one.
    pub fallback_applied: bool,
}

/// Applies a [`RateRule`] to base amounts.
#[derive(Debug, Clone)]
pub struct TaxCalculator {
    rule: RateRule,
    fallback_applied: bool,
}

impl TaxCalculator {
    /// Creates a calculator for an explicitly chosen rule.
    pub fn new(rule: RateRule) -> Self {
        Self {
            rule,
            fallback_applied: false,
        }
    }

    /// Creates a calculator for a rule produced by a rate table lookup.
    pub fn from_resolution(resolution: &Resolution) -> Self {
        Self {
            rule: resolution.rule,
            fallback_applied: resolution.fallback_applied,
        }
    }

    pub fn rule(&self) -> &RateRule {
        &self.rule
    }

    /// Calculates both component taxes for a decimal base amount.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidAmount`] if the amount is negative
    /// or the resulting values exceed the decimal range.
    pub fn calculate(
        &self,
        amount_base: Decimal,
    ) -> Result<CalculationResult, CalculationError> {
        let amount_base = validate_amount(amount_base)?;

        let rate_component_a = self.rule.effective_component_a();
        let rate_component_b = self.rule.effective_component_b();

        let tax_component_a = checked_tax(amount_base, rate_component_a)?;
        let tax_component_b = checked_tax(amount_base, rate_component_b)?;

        let total_tax = tax_component_a
            .checked_add(tax_component_b)
            .ok_or_else(|| CalculationError::InvalidAmount(amount_base.to_string()))?;
        let total_amount = amount_base
            .checked_add(total_tax)
            .ok_or_else(|| CalculationError::InvalidAmount(amount_base.to_string()))?;

        let effective_total_rate = if amount_base.is_zero() {
            rate_component_a + rate_component_b
        } else {
            total_tax / amount_base
        };

        Ok(CalculationResult {
            amount_base,
            rate_component_a,
            rate_component_b,
            tax_component_a,
            tax_component_b,
            total_tax,
            total_amount,
            effective_total_rate,
            fallback_applied: self.fallback_applied,
        })
    }

    /// Calculates both component taxes for a floating-point base amount.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidAmount`] for `NaN`, infinite or
    /// negative amounts.
    pub fn calculate_f64(
        &self,
        amount_base: f64,
    ) -> Result<CalculationResult, CalculationError> {
        self.calculate(amount_from_f64(amount_base)?)
    }
}

fn checked_tax(
    amount_base: Decimal,
    rate: Decimal,
) -> Result<Decimal, CalculationError> {
    amount_base
        .checked_mul(rate)
        .ok_or_else(|| CalculationError::InvalidAmount(amount_base.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn standard_rule() -> RateRule {
        RateRule::without_reduction(dec!(0.009), dec!(0.001)).unwrap()
    }

    fn reduced_rule(reduction: Decimal) -> RateRule {
        RateRule::new(dec!(0.009), dec!(0.001), reduction).unwrap()
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_standard_rule_on_one_thousand() {
        let result = TaxCalculator::new(standard_rule())
            .calculate(dec!(1000))
            .unwrap();

        assert_eq!(result.rate_component_a, dec!(0.009));
        assert_eq!(result.rate_component_b, dec!(0.001));
        assert_eq!(result.tax_component_a, dec!(9.0));
        assert_eq!(result.tax_component_b, dec!(1.0));
        assert_eq!(result.total_tax, dec!(10.0));
        assert_eq!(result.total_amount, dec!(1010.0));
        assert_eq!(result.effective_total_rate, dec!(0.01));
        assert!(!result.fallback_applied);
    }

    #[test]
    fn calculate_sixty_percent_reduction() {
        let result = TaxCalculator::new(reduced_rule(dec!(0.6)))
            .calculate(dec!(1000))
            .unwrap();

        assert_eq!(result.rate_component_a, dec!(0.0036));
        assert_eq!(result.rate_component_b, dec!(0.0004));
        assert_eq!(result.tax_component_a, dec!(3.6));
        assert_eq!(result.tax_component_b, dec!(0.4));
        assert_eq!(result.total_tax, dec!(4.0));
        assert_eq!(result.total_amount, dec!(1004.0));
        assert_eq!(result.effective_total_rate, dec!(0.004));
    }

    #[test]
    fn calculate_half_reduction_on_two_thousand() {
        let result = TaxCalculator::new(reduced_rule(dec!(0.5)))
            .calculate(dec!(2000))
            .unwrap();

        assert_eq!(result.rate_component_a, dec!(0.0045));
        assert_eq!(result.rate_component_b, dec!(0.0005));
        assert_eq!(result.tax_component_a, dec!(9.0));
        assert_eq!(result.tax_component_b, dec!(1.0));
        assert_eq!(result.total_tax, dec!(10.0));
        assert_eq!(result.total_amount, dec!(2010.0));
    }

    #[test]
    fn calculate_full_reduction_yields_no_tax() {
        let result = TaxCalculator::new(reduced_rule(dec!(1)))
            .calculate(dec!(1000))
            .unwrap();

        assert_eq!(result.rate_component_a, Decimal::ZERO);
        assert_eq!(result.rate_component_b, Decimal::ZERO);
        assert_eq!(result.total_tax, Decimal::ZERO);
        assert_eq!(result.total_amount, dec!(1000));
    }

    #[test]
    fn calculate_zero_amount_reports_combined_rate() {
        let result = TaxCalculator::new(reduced_rule(dec!(0.6)))
            .calculate(dec!(0))
            .unwrap();

        assert_eq!(result.total_tax, Decimal::ZERO);
        assert_eq!(result.total_amount, Decimal::ZERO);
        assert_eq!(result.effective_total_rate, dec!(0.004));
    }

    #[test]
    fn calculate_zero_amount_with_zero_rule() {
        let result = TaxCalculator::new(RateRule::ZERO)
            .calculate(dec!(0))
            .unwrap();

        assert_eq!(result.effective_total_rate, Decimal::ZERO);
    }

    #[test]
    fn calculate_rejects_negative_amount() {
        let result = TaxCalculator::new(standard_rule()).calculate(dec!(-50));

        assert_eq!(
            result,
            Err(CalculationError::InvalidAmount("-50".to_string()))
        );
    }

    #[test]
    fn calculate_rejects_amount_that_overflows_gross_total() {
        let result = TaxCalculator::new(reduced_rule(dec!(0))).calculate(Decimal::MAX);

        assert!(matches!(result, Err(CalculationError::InvalidAmount(_))));
    }

    #[test]
    fn calculate_does_not_round_fractional_cents() {
        let result = TaxCalculator::new(standard_rule())
            .calculate(dec!(0.55))
            .unwrap();

        assert_eq!(result.tax_component_a, dec!(0.00495));
        assert_eq!(result.tax_component_b, dec!(0.00055));
    }

    #[test]
    fn calculate_is_repeatable() {
        let calculator = TaxCalculator::new(reduced_rule(dec!(0.6)));

        let first = calculator.calculate(dec!(1234.56)).unwrap();
        let second = calculator.calculate(dec!(1234.56)).unwrap();

        assert_eq!(first, second);
    }

    // =========================================================================
    // calculate_f64 tests
    // =========================================================================

    #[test]
    fn calculate_f64_matches_decimal_path() {
        let calculator = TaxCalculator::new(standard_rule());

        let from_float = calculator.calculate_f64(1000.0).unwrap();
        let from_decimal = calculator.calculate(dec!(1000)).unwrap();

        assert_eq!(from_float, from_decimal);
    }

    #[test]
    fn calculate_f64_rejects_nan_and_infinity() {
        let calculator = TaxCalculator::new(standard_rule());

        assert!(calculator.calculate_f64(f64::NAN).is_err());
        assert!(calculator.calculate_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn calculate_f64_rejects_negative_amount() {
        let result = TaxCalculator::new(standard_rule()).calculate_f64(-50.0);

        assert!(matches!(result, Err(CalculationError::InvalidAmount(_))));
    }

    // =========================================================================
    // from_resolution tests
    // =========================================================================

    #[test]
    fn from_resolution_carries_fallback_flag() {
        let resolution = Resolution {
            rule: RateRule::ZERO,
            fallback_applied: true,
        };

        let result = TaxCalculator::from_resolution(&resolution)
            .calculate(dec!(1000))
            .unwrap();

        assert!(result.fallback_applied);
        assert_eq!(result.total_amount, dec!(1000));
    }
}
