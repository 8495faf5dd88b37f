use std::fs::File;
use std::io::Read;
use std::path::Path;

use reform_core::{RateRule, RateRuleError, RateTable, RateTableError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when loading rate rule data.
#[derive(Debug, Error)]
pub enum RateRuleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Cannot read rate file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid rule for code '{code}' on row {row}: {source}")]
    InvalidRule {
        code: String,
        row: usize,
        source: RateRuleError,
    },

    #[error("Invalid rate table: {0}")]
    Table(#[from] RateTableError),
}

impl From<csv::Error> for RateRuleLoaderError {
    fn from(err: csv::Error) -> Self {
        RateRuleLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the rate rules CSV file.
///
/// - `code`: The classification code (e.g. `011`); kept as text so leading
///   zeros survive
/// - `component_a`: CBS base rate as a fraction (e.g. 0.009)
/// - `component_b`: IBS base rate as a fraction (e.g. 0.001)
/// - `reduction_factor`: Share of both rates removed (empty for none)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RateRuleRecord {
    pub code: String,
    pub component_a: Decimal,
    pub component_b: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub reduction_factor: Option<Decimal>,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for rate rules stored as CSV.
///
/// ```csv
/// code,component_a,component_b,reduction_factor
/// 000,0.009,0.001,
/// 011,0.009,0.001,0.6
/// ```
pub struct RateRuleLoader;

impl RateRuleLoader {
    /// Parse rate rule records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<RateRuleRecord>, RateRuleLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: RateRuleRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Validate records and build a rate table from them.
    ///
    /// Each record becomes one [`RateRule`]; a missing reduction factor means
    /// no reduction. Rows are numbered from 1 (header excluded) in errors.
    pub fn build_table(records: &[RateRuleRecord]) -> Result<RateTable, RateRuleLoaderError> {
        let mut rules = Vec::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            let rule = RateRule::new(
                record.component_a,
                record.component_b,
                record.reduction_factor.unwrap_or_default(),
            )
            .map_err(|source| RateRuleLoaderError::InvalidRule {
                code: record.code.clone(),
                row: idx + 1,
                source,
            })?;
            rules.push((record.code.as_str(), rule));
        }

        Ok(RateTable::from_rules(rules)?)
    }

    /// Read a CSV file from disk and build a rate table from it.
    pub fn load_from_file(path: &Path) -> Result<RateTable, RateRuleLoaderError> {
        let file = File::open(path)?;
        let records = Self::parse(file)?;
        let table = Self::build_table(&records)?;
        info!(path = %path.display(), rules = table.len(), "loaded rate rules");
        Ok(table)
    }
}
