//! Flat-rate scenario simulator.
//!
//! A quick estimate used to compare operations before a precise CST rule is
//! known. A single rate is chosen from the scenario and applied to the base
//! amount:
//!
//! | Condition | Rate |
//! |-----------|------|
//! | Default (commerce) | 12% |
//! | Situation code in the zero-rate list (`06`) | 0% |
//! | Classification is immune or exempt | 0% |
//! | Activity group is services | 9% |
//!
//! The conditions are applied top to bottom and the last matching one wins,
//! so a services scenario is always charged the services rate.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use reform_core::calculations::{
//!     ActivityGroup, ScenarioInput, ScenarioSimulator, TaxClassification,
//! };
//!
//! let simulator = ScenarioSimulator::default();
//! let input = ScenarioInput {
//!     group: ActivityGroup::Commerce,
//!     situation_code: "01".to_string(),
//!     classification: TaxClassification::Normal,
//!     amount_base: dec!(1000),
//! };
//!
//! let result = simulator.simulate(&input).unwrap();
//! assert_eq!(result.rate, dec!(0.12));
//! assert_eq!(result.tax_amount, dec!(120));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{CalculationError, validate_amount};

/// Main activity group of the simulated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityGroup {
    Commerce,
    Services,
}

impl ActivityGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commerce => "commerce",
            Self::Services => "services",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commerce" | "comercio" => Some(Self::Commerce),
            "services" | "servicos" => Some(Self::Services),
            _ => None,
        }
    }
}

/// Tax classification of the simulated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxClassification {
    Normal,
    Immune,
    Exempt,
}

impl TaxClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Immune => "immune",
            Self::Exempt => "exempt",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "immune" | "imune" => Some(Self::Immune),
            "exempt" | "isento" => Some(Self::Exempt),
            _ => None,
        }
    }

    fn is_untaxed(&self) -> bool {
        matches!(self, Self::Immune | Self::Exempt)
    }
}

/// Rates used by the simulator. Missing fields take the default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Rate charged on commerce operations.
    pub commerce_rate: Decimal,

    /// Rate charged on services operations.
    pub services_rate: Decimal,

    /// Situation codes that are zero-rated.
    pub zero_rate_situations: Vec<String>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            commerce_rate: dec!(0.12),
            services_rate: dec!(0.09),
            zero_rate_situations: vec!["06".to_string()],
        }
    }
}

/// Inputs for one simulated operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub group: ActivityGroup,
    pub situation_code: String,
    pub classification: TaxClassification,
    pub amount_base: Decimal,
}

/// Result of a simulated operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Flat rate applied to the base amount.
    pub rate: Decimal,

    pub amount_base: Decimal,

    /// `amount_base × rate`.
    pub tax_amount: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct ScenarioSimulator {
    config: ScenarioConfig,
}

impl ScenarioSimulator {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    /// Simulates the flat-rate tax for one operation.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidAmount`] if the base amount is
    /// negative or the tax exceeds the decimal range.
    pub fn simulate(
        &self,
        input: &ScenarioInput,
    ) -> Result<ScenarioResult, CalculationError> {
        let amount_base = validate_amount(input.amount_base)?;
        let rate = self.rate_for(input);
        let tax_amount = amount_base
            .checked_mul(rate)
            .ok_or_else(|| CalculationError::InvalidAmount(amount_base.to_string()))?;

        Ok(ScenarioResult {
            rate,
            amount_base,
            tax_amount,
        })
    }

    /// Picks the flat rate for a scenario.
    pub fn rate_for(
        &self,
        input: &ScenarioInput,
    ) -> Decimal {
        let mut rate = self.config.commerce_rate;

        let situation = input.situation_code.trim();
        if self
            .config
            .zero_rate_situations
            .iter()
            .any(|code| code == situation)
        {
            rate = Decimal::ZERO;
        }
        if input.classification.is_untaxed() {
            rate = Decimal::ZERO;
        }
        if input.group == ActivityGroup::Services {
            rate = self.config.services_rate;
        }

        rate
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn input(
        group: ActivityGroup,
        situation_code: &str,
        classification: TaxClassification,
    ) -> ScenarioInput {
        ScenarioInput {
            group,
            situation_code: situation_code.to_string(),
            classification,
            amount_base: dec!(1000),
        }
    }

    // =========================================================================
    // rate selection tests
    // =========================================================================

    #[test]
    fn commerce_normal_uses_commerce_rate() {
        let simulator = ScenarioSimulator::default();

        let rate = simulator.rate_for(&input(
            ActivityGroup::Commerce,
            "01",
            TaxClassification::Normal,
        ));

        assert_eq!(rate, dec!(0.12));
    }

    #[test]
    fn zero_rate_situation_is_untaxed() {
        let simulator = ScenarioSimulator::default();

        let rate = simulator.rate_for(&input(
            ActivityGroup::Commerce,
            "06",
            TaxClassification::Normal,
        ));

        assert_eq!(rate, Decimal::ZERO);
    }

    #[test]
    fn immune_and_exempt_classifications_are_untaxed() {
        let simulator = ScenarioSimulator::default();

        for classification in [TaxClassification::Immune, TaxClassification::Exempt] {
            let rate = simulator.rate_for(&input(ActivityGroup::Commerce, "01", classification));
            assert_eq!(rate, Decimal::ZERO, "classification {:?}", classification);
        }
    }

    #[test]
    fn services_rate_overrides_zero_rate_conditions() {
        let simulator = ScenarioSimulator::default();

        let rate = simulator.rate_for(&input(
            ActivityGroup::Services,
            "06",
            TaxClassification::Exempt,
        ));

        assert_eq!(rate, dec!(0.09));
    }

    #[test]
    fn custom_config_changes_rates() {
        let simulator = ScenarioSimulator::new(ScenarioConfig {
            commerce_rate: dec!(0.265),
            services_rate: dec!(0.1),
            zero_rate_situations: vec!["06".to_string(), "41".to_string()],
        });

        let commerce = simulator.rate_for(&input(
            ActivityGroup::Commerce,
            "49",
            TaxClassification::Normal,
        ));
        let zero = simulator.rate_for(&input(
            ActivityGroup::Commerce,
            "41",
            TaxClassification::Normal,
        ));

        assert_eq!(commerce, dec!(0.265));
        assert_eq!(zero, Decimal::ZERO);
    }

    // =========================================================================
    // simulate tests
    // =========================================================================

    #[test]
    fn simulate_services_operation() {
        let simulator = ScenarioSimulator::default();

        let result = simulator
            .simulate(&input(
                ActivityGroup::Services,
                "01",
                TaxClassification::Normal,
            ))
            .unwrap();

        assert_eq!(
            result,
            ScenarioResult {
                rate: dec!(0.09),
                amount_base: dec!(1000),
                tax_amount: dec!(90),
            }
        );
    }

    #[test]
    fn simulate_rejects_negative_amount() {
        let simulator = ScenarioSimulator::default();
        let scenario = ScenarioInput {
            amount_base: dec!(-1),
            ..input(ActivityGroup::Commerce, "01", TaxClassification::Normal)
        };

        let result = simulator.simulate(&scenario);

        assert_eq!(result, Err(CalculationError::InvalidAmount("-1".to_string())));
    }

    // =========================================================================
    // parsing tests
    // =========================================================================

    #[test]
    fn parse_accepts_portuguese_labels() {
        assert_eq!(ActivityGroup::parse("Servicos"), Some(ActivityGroup::Services));
        assert_eq!(ActivityGroup::parse("comercio"), Some(ActivityGroup::Commerce));
        assert_eq!(TaxClassification::parse("Imune"), Some(TaxClassification::Immune));
        assert_eq!(TaxClassification::parse("Isento"), Some(TaxClassification::Exempt));
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!(ActivityGroup::parse("industry"), None);
        assert_eq!(TaxClassification::parse(""), None);
    }
}
