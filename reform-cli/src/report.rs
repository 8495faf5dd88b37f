//! Plain-text rendering of results and reference data.
//!
//! Money is rounded half-up to two places and rates are shown as
//! percentages. Rounding happens here only; the values passed in are the
//! exact results from the calculators.

use std::fmt;

use reform_core::calculations::common::{as_percentage, round_half_up};
use reform_core::{CalculationResult, RateTable, ScenarioInput, ScenarioResult};
use reform_data::{CstEntry, NcmDetail, NcmEntry, RateComparison, Source, TaxRegime};
use rust_decimal::Decimal;

/// Format decimal as currency string.
fn fmt_currency(val: Decimal) -> String {
    format!("R$ {:.2}", round_half_up(val))
}

/// Format a fractional rate as a percentage (`0.0036` → `0.36%`).
fn fmt_rate(rate: Decimal) -> String {
    format!("{}%", as_percentage(rate))
}

/// Format a rate that is already a percentage.
fn opt_percent_display(val: Option<Decimal>) -> String {
    match val {
        Some(d) => format!("{}%", d.normalize()),
        None => "-".to_string(),
    }
}

/// A zero rate means the tax does not exist in that period.
fn nonzero_percent_display(val: Decimal) -> String {
    if val.is_zero() {
        "-".to_string()
    } else {
        opt_percent_display(Some(val))
    }
}

fn opt_str_display(val: Option<&str>) -> &str {
    val.filter(|s| !s.is_empty()).unwrap_or("-")
}

pub struct CalculationReport<'a> {
    pub code: &'a str,
    pub result: &'a CalculationResult,
}

impl fmt::Display for CalculationReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.result;
        writeln!(f, "Code:            {}", self.code.trim())?;
        writeln!(f, "Base amount:     {}", fmt_currency(r.amount_base))?;
        writeln!(f, "CBS rate:        {}", fmt_rate(r.rate_component_a))?;
        writeln!(f, "IBS rate:        {}", fmt_rate(r.rate_component_b))?;
        writeln!(f, "CBS tax:         {}", fmt_currency(r.tax_component_a))?;
        writeln!(f, "IBS tax:         {}", fmt_currency(r.tax_component_b))?;
        writeln!(f, "Total tax:       {}", fmt_currency(r.total_tax))?;
        writeln!(f, "Total amount:    {}", fmt_currency(r.total_amount))?;
        writeln!(f, "Effective rate:  {}", fmt_rate(r.effective_total_rate))?;
        if r.fallback_applied {
            writeln!(f, "Note: code not found in the rate table, zero rate applied")?;
        }
        Ok(())
    }
}

pub struct ScenarioReport<'a> {
    pub input: &'a ScenarioInput,
    pub result: &'a ScenarioResult,
}

impl fmt::Display for ScenarioReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Activity group:  {}", self.input.group.as_str())?;
        writeln!(f, "Situation code:  {}", self.input.situation_code.trim())?;
        writeln!(f, "Classification:  {}", self.input.classification.as_str())?;
        writeln!(f, "Base amount:     {}", fmt_currency(self.result.amount_base))?;
        writeln!(f, "Rate:            {}", fmt_rate(self.result.rate))?;
        writeln!(f, "Tax amount:      {}", fmt_currency(self.result.tax_amount))
    }
}

/// Codes and effective rates of a rate table, sorted by code.
pub struct RateTableReport<'a>(pub &'a RateTable);

impl fmt::Display for RateTableReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{:<6} {:>9} {:>9} {:>10}", "Code", "CBS", "IBS", "Reduction")?;
        for code in self.0.codes() {
            let Some(rule) = self.0.lookup(code.as_str()) else {
                continue;
            };
            writeln!(
                f,
                "{:<6} {:>9} {:>9} {:>10}",
                code,
                fmt_rate(rule.effective_component_a()),
                fmt_rate(rule.effective_component_b()),
                fmt_rate(rule.reduction_factor()),
            )?;
        }
        Ok(())
    }
}

pub struct NcmList<'a>(pub &'a [&'a NcmEntry]);

impl fmt::Display for NcmList<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No NCM entries found.");
        }
        for entry in self.0 {
            writeln!(
                f,
                "{:<12} CBS {:>7}  IBS {:>7}  {:<9}  {}",
                entry.code,
                opt_percent_display(entry.component_a_rate),
                opt_percent_display(entry.component_b_rate),
                entry.rate_trend().label(),
                entry.description,
            )?;
        }
        Ok(())
    }
}

/// Top-level NCM entries with their subcategories indented beneath.
pub struct NcmTree<'a>(pub &'a [NcmDetail<'a>]);

impl fmt::Display for NcmTree<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No NCM entries found.");
        }
        for group in self.0 {
            write!(f, "{}", NcmList(&[group.base]))?;
            for sub in &group.subcategories {
                write!(f, "  {}", NcmList(&[*sub]))?;
            }
        }
        Ok(())
    }
}

pub struct NcmDetailReport<'a>(pub &'a NcmDetail<'a>);

impl fmt::Display for NcmDetailReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let base = self.0.base;
        writeln!(f, "NCM:          {}", base.code)?;
        writeln!(f, "Description:  {}", base.description)?;
        writeln!(f, "Unit:         {}", opt_str_display(base.unit.as_deref()))?;
        writeln!(f, "CBS rate:     {}", opt_percent_display(base.component_a_rate))?;
        writeln!(f, "IBS rate:     {}", opt_percent_display(base.component_b_rate))?;
        writeln!(
            f,
            "Valid:        {} to {}",
            opt_str_display(base.start_date.as_deref()),
            opt_str_display(base.end_date.as_deref()),
        )?;
        if let Some(act_type) = base.act_type.as_deref() {
            writeln!(
                f,
                "Legal act:    {} {}/{}",
                act_type,
                opt_str_display(base.act_number.as_deref()),
                opt_str_display(base.act_year.as_deref()),
            )?;
        }
        if let Some(notes) = base.notes.as_deref() {
            writeln!(f, "Notes:        {notes}")?;
        }
        for cst in &base.csts {
            writeln!(f, "CST:          {} - {}", cst.code, cst.description)?;
        }

        writeln!(f)?;
        if self.0.subcategories.is_empty() {
            writeln!(f, "No subcategories.")
        } else {
            writeln!(f, "Subcategories:")?;
            write!(f, "{}", NcmList(&self.0.subcategories))
        }
    }
}

pub struct CstList<'a>(pub &'a [&'a CstEntry]);

impl fmt::Display for CstList<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No CST entries found.");
        }
        for entry in self.0 {
            writeln!(f, "{:<4} {} ({})", entry.code, entry.description, entry.kind)?;
            writeln!(f, "     {}", entry.notes)?;
        }
        Ok(())
    }
}

pub struct ComparisonList<'a>(pub &'a [RateComparison]);

impl fmt::Display for ComparisonList<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(
            f,
            "{:<18} {:>7} {:>7}  {:<8}  {}",
            "Tax", "Current", "Future", "Status", "Sector"
        )?;
        for row in self.0 {
            writeln!(
                f,
                "{:<18} {:>7} {:>7}  {:<8}  {}",
                row.tax,
                nonzero_percent_display(row.component_a_rate),
                nonzero_percent_display(row.component_b_rate),
                row.status().label(),
                row.sector,
            )?;
        }
        Ok(())
    }
}

pub struct RegimeList<'a>(pub &'a [TaxRegime]);

impl fmt::Display for RegimeList<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (idx, regime) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            writeln!(f, "== {} ==", regime.name)?;
            writeln!(f, "{}", regime.description)?;
            writeln!(f)?;
            writeln!(f, "{}", regime.comparison)?;
        }
        Ok(())
    }
}

pub struct SourceList<'a>(pub &'a [Source]);

impl fmt::Display for SourceList<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for source in self.0 {
            writeln!(f, "{}: {}", source.name, source.description)?;
            writeln!(f, "  {}", source.url)?;
        }
        Ok(())
    }
}
