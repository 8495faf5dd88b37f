use std::collections::HashMap;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use super::builtin::BUILTIN_RULES;
use crate::calculations::common::{CalculationError, amount_from_f64};
use crate::calculations::{CalculationResult, TaxCalculator};
use crate::{ClassificationCode, RateRule};

/// Errors raised while building a rate table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateTableError {
    /// Two rules were supplied for the same code.
    #[error("duplicate rate rule for code '{0}'")]
    DuplicateCode(String),

    /// A rule was supplied with a blank code.
    #[error("rate rule code must not be empty")]
    EmptyCode,
}

/// Outcome of resolving a code against a [`RateTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The rule that applies to the code.
    pub rule: RateRule,

    /// True when the code had no entry and [`RateRule::ZERO`] was used.
    pub fallback_applied: bool,
}

/// Immutable mapping from classification code to rate rule.
///
/// Built once at startup and shared read-only; lookups never mutate it, so a
/// table can be used from several threads behind a plain reference or `Arc`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use reform_core::{RateRule, RateTable};
///
/// let table = RateTable::from_rules([
///     ("000", RateRule::without_reduction(dec!(0.009), dec!(0.001)).unwrap()),
/// ])
/// .unwrap();
///
/// let known = table.resolve("000");
/// assert!(!known.fallback_applied);
///
/// let unknown = table.resolve("999");
/// assert!(unknown.fallback_applied);
/// assert_eq!(unknown.rule, RateRule::ZERO);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rules: HashMap<ClassificationCode, RateRule>,
}

impl RateTable {
    /// Creates an empty table; every code resolves to the zero-rate rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the table shipped with the crate (CST `000`, `011`, `210`).
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|(code, rule)| (ClassificationCode::new(code), *rule))
            .collect();
        Self { rules }
    }

    /// Builds a table from `(code, rule)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`RateTableError::DuplicateCode`] if a code appears twice and
    /// [`RateTableError::EmptyCode`] for a blank code.
    pub fn from_rules<I, C>(rules: I) -> Result<Self, RateTableError>
    where
        I: IntoIterator<Item = (C, RateRule)>,
        C: Into<ClassificationCode>,
    {
        let mut table = Self::new();
        for (code, rule) in rules {
            table.insert(code, rule)?;
        }
        debug!(rules = table.len(), "rate table built");
        Ok(table)
    }

    fn insert(
        &mut self,
        code: impl Into<ClassificationCode>,
        rule: RateRule,
    ) -> Result<(), RateTableError> {
        let code = code.into();
        if code.is_empty() {
            return Err(RateTableError::EmptyCode);
        }
        if self.rules.contains_key(&code) {
            return Err(RateTableError::DuplicateCode(code.to_string()));
        }
        self.rules.insert(code, rule);
        Ok(())
    }

    /// Returns the rule stored for `code`, if any.
    pub fn lookup(
        &self,
        code: &str,
    ) -> Option<&RateRule> {
        self.rules.get(code.trim())
    }

    /// Resolves `code` to a rule, falling back to [`RateRule::ZERO`].
    ///
    /// Never fails: empty, malformed and unknown codes all resolve to the
    /// zero-rate rule with `fallback_applied` set.
    pub fn resolve(
        &self,
        code: &str,
    ) -> Resolution {
        match self.lookup(code) {
            Some(rule) => Resolution {
                rule: *rule,
                fallback_applied: false,
            },
            None => {
                warn!(code, "no rate rule for code; applying zero-rate fallback");
                Resolution {
                    rule: RateRule::ZERO,
                    fallback_applied: true,
                }
            }
        }
    }

    /// Resolves `code` and calculates the tax on a floating-point amount.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidAmount`] for `NaN`, infinite or
    /// negative amounts. Unknown codes are not an error.
    pub fn calculate(
        &self,
        code: &str,
        amount_base: f64,
    ) -> Result<CalculationResult, CalculationError> {
        let amount_base = amount_from_f64(amount_base)?;
        self.calculate_decimal(code, amount_base)
    }

    /// Resolves `code` and calculates the tax on a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidAmount`] for negative amounts.
    pub fn calculate_decimal(
        &self,
        code: &str,
        amount_base: Decimal,
    ) -> Result<CalculationResult, CalculationError> {
        let resolution = self.resolve(code);
        TaxCalculator::from_resolution(&resolution).calculate(amount_base)
    }

    /// Known codes in ascending order.
    pub fn codes(&self) -> Vec<&ClassificationCode> {
        let mut codes: Vec<_> = self.rules.keys().collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
