//! Display-only reference data: NCM and CST codes, rate comparisons,
//! taxation regimes and official sources.

mod builtin;
mod catalog;
mod records;

pub use catalog::{ReferenceCatalog, ReferenceLoadError};
pub use records::{
    ComparisonStatus, CstEntry, CstRef, NcmDetail, NcmEntry, RateComparison, Source, TaxRegime,
};
