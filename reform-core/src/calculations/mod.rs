//! Tax calculation over resolved rate rules.
//!
//! [`tax`] applies a [`crate::RateRule`] to a base amount. [`scenario`] holds
//! the simplified flat-rate simulator used for quick regime comparisons.

pub mod common;
pub mod scenario;
pub mod tax;

pub use common::CalculationError;
pub use scenario::{
    ActivityGroup, ScenarioConfig, ScenarioInput, ScenarioResult, ScenarioSimulator,
    TaxClassification,
};
pub use tax::{CalculationResult, TaxCalculator};
