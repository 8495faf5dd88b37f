//! Data sources for the rate engine and the reference portal.
//!
//! * [`RateRuleLoader`] reads rate rules from CSV into a
//!   [`reform_core::RateTable`].
//! * [`ReferenceCatalog`] holds display-only NCM, CST, rate comparison,
//!   regime and source records, and answers the portal's searches.

mod loader;
pub mod reference;

pub use loader::{RateRuleLoader, RateRuleLoaderError, RateRuleRecord};
pub use reference::{
    ComparisonStatus, CstEntry, CstRef, NcmDetail, NcmEntry, RateComparison, ReferenceCatalog,
    ReferenceLoadError, Source, TaxRegime,
};
