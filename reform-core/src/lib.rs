//! Rate resolution and tax calculation for the CBS/IBS transition.
//!
//! A [`RateTable`] maps classification codes (CST / cClassTrib) to a
//! [`RateRule`]. Resolving a code never fails: unknown codes fall back to the
//! zero-rate rule. The [`TaxCalculator`] applies a rule to a base amount.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use reform_core::RateTable;
//!
//! let table = RateTable::builtin();
//! let result = table.calculate("011", 1000.0).unwrap();
//!
//! assert_eq!(result.tax_component_a, dec!(3.6));
//! assert_eq!(result.tax_component_b, dec!(0.4));
//! assert_eq!(result.total_amount, dec!(1004));
//! assert!(!result.fallback_applied);
//! ```

pub mod calculations;
pub mod models;
pub mod rates;

pub use calculations::{
    ActivityGroup, CalculationError, CalculationResult, ScenarioConfig, ScenarioInput,
    ScenarioResult, ScenarioSimulator, TaxCalculator, TaxClassification,
};
pub use models::*;
pub use rates::{RateTable, RateTableError, Resolution};
