//! Rate rules: how the two sub-rates of a classification code are derived.
//!
//! A rule carries the nominal rate of each component (CBS as component A,
//! IBS as component B) and a single reduction factor applied to both:
//!
//! ```text
//! effective = base × (1 − reduction_factor)
//! ```
//!
//! All values are fractions, not percentages (`0.009` is 0.9%).

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Errors raised when a rate rule is built from out-of-range values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateRuleError {
    #[error("component A base rate must not be negative, got {0}")]
    NegativeComponentA(Decimal),

    #[error("component B base rate must not be negative, got {0}")]
    NegativeComponentB(Decimal),

    /// The reduction factor must be between 0 and 1.
    #[error("reduction factor must be between 0 and 1, got {0}")]
    InvalidReductionFactor(Decimal),
}

/// Nominal rates and reduction factor for one classification code.
///
/// Instances can only be obtained through [`RateRule::new`] (validated) or
/// the [`RateRule::ZERO`] constant, so every rule in circulation satisfies
/// `0 ≤ effective ≤ base`. Base rates have no upper bound; a selective tax
/// can exceed 100%.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use reform_core::RateRule;
///
/// let rule = RateRule::new(dec!(0.009), dec!(0.001), dec!(0.6)).unwrap();
///
/// assert_eq!(rule.effective_component_a(), dec!(0.0036));
/// assert_eq!(rule.effective_component_b(), dec!(0.0004));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateRule {
    base_component_a: Decimal,
    base_component_b: Decimal,
    reduction_factor: Decimal,
}

impl RateRule {
    /// The fallback rule applied to codes missing from a rate table.
    pub const ZERO: RateRule = RateRule {
        base_component_a: Decimal::ZERO,
        base_component_b: Decimal::ZERO,
        reduction_factor: Decimal::ZERO,
    };

    /// Creates a validated rule.
    ///
    /// # Errors
    ///
    /// Returns [`RateRuleError`] if either base rate is negative or the
    /// reduction factor is outside `[0, 1]`.
    pub fn new(
        base_component_a: Decimal,
        base_component_b: Decimal,
        reduction_factor: Decimal,
    ) -> Result<Self, RateRuleError> {
        let rule = Self {
            base_component_a,
            base_component_b,
            reduction_factor,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Creates a rule with no reduction.
    pub fn without_reduction(
        base_component_a: Decimal,
        base_component_b: Decimal,
    ) -> Result<Self, RateRuleError> {
        Self::new(base_component_a, base_component_b, Decimal::ZERO)
    }

    /// Builds a rule from values already known to be in range.
    pub(crate) const fn from_parts_unchecked(
        base_component_a: Decimal,
        base_component_b: Decimal,
        reduction_factor: Decimal,
    ) -> Self {
        Self {
            base_component_a,
            base_component_b,
            reduction_factor,
        }
    }

    fn validate(&self) -> Result<(), RateRuleError> {
        if self.base_component_a < Decimal::ZERO {
            return Err(RateRuleError::NegativeComponentA(self.base_component_a));
        }
        if self.base_component_b < Decimal::ZERO {
            return Err(RateRuleError::NegativeComponentB(self.base_component_b));
        }
        if !is_fraction(self.reduction_factor) {
            return Err(RateRuleError::InvalidReductionFactor(
                self.reduction_factor,
            ));
        }
        Ok(())
    }

    pub fn base_component_a(&self) -> Decimal {
        self.base_component_a
    }

    pub fn base_component_b(&self) -> Decimal {
        self.base_component_b
    }

    pub fn reduction_factor(&self) -> Decimal {
        self.reduction_factor
    }

    /// Share of the base rates that is still charged (`1 − reduction_factor`).
    pub fn retained_factor(&self) -> Decimal {
        Decimal::ONE - self.reduction_factor
    }

    /// Component A rate after the reduction.
    pub fn effective_component_a(&self) -> Decimal {
        self.base_component_a * self.retained_factor()
    }

    /// Component B rate after the reduction.
    pub fn effective_component_b(&self) -> Decimal {
        self.base_component_b * self.retained_factor()
    }

    /// Sum of both effective rates.
    pub fn combined_effective_rate(&self) -> Decimal {
        self.effective_component_a() + self.effective_component_b()
    }

    /// True when both effective rates are zero (exempt, zero-rated or fallback).
    pub fn is_zero_rated(&self) -> bool {
        self.combined_effective_rate().is_zero()
    }
}

impl Default for RateRule {
    fn default() -> Self {
        Self::ZERO
    }
}

fn is_fraction(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}
