//! Rate table and code resolution.

mod builtin;
mod table;

pub use builtin::BUILTIN_RULES;
pub use table::{RateTable, RateTableError, Resolution};
