//! Display-only reference records.
//!
//! Field names follow the portal's JSON documents (`codigo`, `descricao`,
//! ...) on the wire. Rates in these records are percentages for display
//! (`18.5` is 18.5%), unlike the fractions used by the rate engine.

use reform_core::RateTrend;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A CST code linked from an NCM entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CstRef {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "descricao")]
    pub description: String,
}

/// One NCM (Mercosur Common Nomenclature) item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NcmEntry {
    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "descricao")]
    pub description: String,

    #[serde(rename = "data_inicio", default)]
    pub start_date: Option<String>,

    #[serde(rename = "data_fim", default)]
    pub end_date: Option<String>,

    /// Type of the legal act that introduced the code.
    #[serde(rename = "tipo_ato_ini", default)]
    pub act_type: Option<String>,

    #[serde(rename = "numero_ato_ini", default)]
    pub act_number: Option<String>,

    #[serde(rename = "ano_ato_ini", default)]
    pub act_year: Option<String>,

    #[serde(default)]
    pub csts: Vec<CstRef>,

    /// CBS rate in percent.
    #[serde(rename = "aliquotaCBS", default)]
    pub component_a_rate: Option<Decimal>,

    /// IBS rate in percent.
    #[serde(rename = "aliquotaIBS", default)]
    pub component_b_rate: Option<Decimal>,

    #[serde(rename = "unidade", default)]
    pub unit: Option<String>,

    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
}

impl NcmEntry {
    /// Direction of change from the CBS rate to the IBS rate.
    pub fn rate_trend(&self) -> RateTrend {
        RateTrend::between(self.component_a_rate, self.component_b_rate)
    }

    /// True when `other` is a subcategory of this entry (`0201` → `0201.10`).
    pub fn is_parent_of(
        &self,
        other: &NcmEntry,
    ) -> bool {
        other
            .code
            .strip_prefix(self.code.as_str())
            .is_some_and(|rest| rest.starts_with('.'))
    }
}

/// An NCM entry together with its subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NcmDetail<'a> {
    pub base: &'a NcmEntry,
    pub subcategories: Vec<&'a NcmEntry>,
}

/// One tax situation code with its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CstEntry {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "descricao")]
    pub description: String,
    /// Operation direction, e.g. "Entrada/Saída".
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "observacoes")]
    pub notes: String,
}

/// A legacy tax and the CBS/IBS rates that replace it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateComparison {
    #[serde(rename = "tributo")]
    pub tax: String,
    #[serde(rename = "baseLegal")]
    pub legal_basis: String,
    #[serde(rename = "aliquotaCBS")]
    pub component_a_rate: Decimal,
    #[serde(rename = "aliquotaIBS")]
    pub component_b_rate: Decimal,
    #[serde(rename = "setor")]
    pub sector: String,
}

impl RateComparison {
    pub fn status(&self) -> ComparisonStatus {
        ComparisonStatus::between(self.component_a_rate, self.component_b_rate)
    }
}

/// Where a tax stands in the transition, judged from its current and future
/// rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonStatus {
    /// No current rate, a future one: a tax the reform introduces.
    NewTax,
    /// A current rate and no future one: a tax the reform removes.
    Replaced,
    InForce,
}

impl ComparisonStatus {
    pub fn between(
        current: Decimal,
        future: Decimal,
    ) -> Self {
        if current.is_zero() && future > Decimal::ZERO {
            Self::NewTax
        } else if current > Decimal::ZERO && future.is_zero() {
            Self::Replaced
        } else {
            Self::InForce
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NewTax => "new tax",
            Self::Replaced => "replaced",
            Self::InForce => "in force",
        }
    }
}

/// A taxation regime and how the transition affects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRegime {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    /// Before/after comparison, markdown formatted.
    #[serde(rename = "comparativo")]
    pub comparison: String,
}

/// An official source of information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn ncm(code: &str) -> NcmEntry {
        NcmEntry {
            code: code.to_string(),
            description: String::new(),
            start_date: None,
            end_date: None,
            act_type: None,
            act_number: None,
            act_year: None,
            csts: Vec::new(),
            component_a_rate: None,
            component_b_rate: None,
            unit: None,
            notes: None,
        }
    }

    #[test]
    fn is_parent_of_requires_dot_separator() {
        let parent = ncm("0201");

        assert!(parent.is_parent_of(&ncm("0201.10")));
        assert!(parent.is_parent_of(&ncm("0201.10.00")));
        assert!(!parent.is_parent_of(&ncm("02011")));
        assert!(!parent.is_parent_of(&ncm("0201")));
        assert!(!parent.is_parent_of(&ncm("0202.10")));
    }

    #[test]
    fn ncm_rate_trend_compares_components() {
        let entry = NcmEntry {
            component_a_rate: Some(dec!(16.5)),
            component_b_rate: Some(dec!(12.0)),
            ..ncm("8471.30.12")
        };

        assert_eq!(entry.rate_trend(), RateTrend::Decrease);
    }

    #[test]
    fn comparison_status_follows_current_and_future_rates() {
        assert_eq!(
            ComparisonStatus::between(dec!(0), dec!(17.7)),
            ComparisonStatus::NewTax
        );
        assert_eq!(
            ComparisonStatus::between(dec!(9.25), dec!(0)),
            ComparisonStatus::Replaced
        );
        assert_eq!(
            ComparisonStatus::between(dec!(12), dec!(8)),
            ComparisonStatus::InForce
        );
        assert_eq!(
            ComparisonStatus::between(dec!(0), dec!(0)),
            ComparisonStatus::InForce
        );
    }

    #[test]
    fn comparison_with_both_rates_is_in_force() {
        let comparison = RateComparison {
            tax: "ICMS".to_string(),
            legal_basis: "Constituição Federal".to_string(),
            component_a_rate: dec!(17),
            component_b_rate: dec!(20),
            sector: String::new(),
        };

        assert_eq!(comparison.status(), ComparisonStatus::InForce);
        assert_eq!(comparison.status().label(), "in force");
    }
}
