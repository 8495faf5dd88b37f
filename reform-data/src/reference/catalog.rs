use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use super::builtin;
use super::records::{CstEntry, NcmDetail, NcmEntry, RateComparison, Source, TaxRegime};

/// Errors that can occur while loading reference documents.
#[derive(Debug, Error)]
pub enum ReferenceLoadError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot read reference file: {0}")]
    Io(#[from] std::io::Error),
}

/// In-memory reference data with the portal's search operations.
///
/// Searches are case-insensitive substring matches and return entries in
/// their original order. An empty search term matches everything.
#[derive(Debug, Clone)]
pub struct ReferenceCatalog {
    ncm: Vec<NcmEntry>,
    cst: Vec<CstEntry>,
    rate_comparisons: Vec<RateComparison>,
    regimes: Vec<TaxRegime>,
    sources: Vec<Source>,
}

impl ReferenceCatalog {
    /// Catalog built from the data embedded in the crate.
    pub fn builtin() -> Self {
        Self {
            ncm: builtin::ncm_entries(),
            cst: builtin::cst_entries(),
            rate_comparisons: builtin::rate_comparisons(),
            regimes: builtin::regimes(),
            sources: builtin::sources(),
        }
    }

    /// Replaces the NCM entries, keeping everything else.
    pub fn with_ncm_entries(
        mut self,
        ncm: Vec<NcmEntry>,
    ) -> Self {
        self.ncm = ncm;
        self
    }

    /// Parses an NCM JSON document (an array of NCM objects).
    pub fn parse_ncm_json<R: Read>(reader: R) -> Result<Vec<NcmEntry>, ReferenceLoadError> {
        let entries: Vec<NcmEntry> = serde_json::from_reader(reader)?;
        debug!(entries = entries.len(), "parsed NCM document");
        Ok(entries)
    }

    /// Builtin catalog with its NCM entries replaced by those in `reader`.
    pub fn from_ncm_json<R: Read>(reader: R) -> Result<Self, ReferenceLoadError> {
        let ncm = Self::parse_ncm_json(reader)?;
        Ok(Self::builtin().with_ncm_entries(ncm))
    }

    /// Reads an NCM JSON file from disk.
    pub fn load_ncm_file(path: &Path) -> Result<Self, ReferenceLoadError> {
        let file = File::open(path)?;
        let catalog = Self::from_ncm_json(BufReader::new(file))?;
        info!(path = %path.display(), entries = catalog.ncm.len(), "loaded NCM reference data");
        Ok(catalog)
    }

    /// NCM entries whose code or description contains `term`.
    pub fn search_ncm(
        &self,
        term: &str,
    ) -> Vec<&NcmEntry> {
        let needle = term.trim().to_lowercase();
        self.ncm
            .iter()
            .filter(|entry| contains(&entry.code, &needle) || contains(&entry.description, &needle))
            .collect()
    }

    /// CST entries whose code, description or kind contains `term`.
    pub fn search_cst(
        &self,
        term: &str,
    ) -> Vec<&CstEntry> {
        let needle = term.trim().to_lowercase();
        self.cst
            .iter()
            .filter(|entry| {
                contains(&entry.code, &needle)
                    || contains(&entry.description, &needle)
                    || contains(&entry.kind, &needle)
            })
            .collect()
    }

    /// NCM search results grouped under their top-level entries.
    ///
    /// A top-level entry is one with no parent in the catalog. It is listed
    /// when it or any of its subcategories matches `term`, and carries only
    /// the matching subcategories. An empty term lists the whole tree.
    pub fn search_ncm_grouped(
        &self,
        term: &str,
    ) -> Vec<NcmDetail<'_>> {
        let matches = self.search_ncm(term);
        self.ncm
            .iter()
            .filter(|entry| self.is_top_level(entry))
            .filter_map(|base| {
                let subcategories: Vec<_> = matches
                    .iter()
                    .copied()
                    .filter(|entry| base.is_parent_of(entry))
                    .collect();
                let base_matches = matches.iter().any(|entry| entry.code == base.code);
                (base_matches || !subcategories.is_empty()).then_some(NcmDetail {
                    base,
                    subcategories,
                })
            })
            .collect()
    }

    fn is_top_level(
        &self,
        entry: &NcmEntry,
    ) -> bool {
        !self.ncm.iter().any(|other| other.is_parent_of(entry))
    }

    /// Exact NCM code lookup.
    pub fn find_ncm(
        &self,
        code: &str,
    ) -> Option<&NcmEntry> {
        let code = code.trim();
        self.ncm.iter().find(|entry| entry.code == code)
    }

    /// The NCM entry for `code` and every entry nested under it.
    ///
    /// Returns `None` when no entry has exactly that code.
    pub fn ncm_with_subcategories(
        &self,
        code: &str,
    ) -> Option<NcmDetail<'_>> {
        let base = self.find_ncm(code)?;
        let subcategories = self
            .ncm
            .iter()
            .filter(|entry| base.is_parent_of(entry))
            .collect();
        Some(NcmDetail {
            base,
            subcategories,
        })
    }

    pub fn ncm_entries(&self) -> &[NcmEntry] {
        &self.ncm
    }

    pub fn cst_entries(&self) -> &[CstEntry] {
        &self.cst
    }

    pub fn rate_comparisons(&self) -> &[RateComparison] {
        &self.rate_comparisons
    }

    pub fn regimes(&self) -> &[TaxRegime] {
        &self.regimes
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }
}

impl Default for ReferenceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn contains(
    haystack: &str,
    lowercase_needle: &str,
) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::reference::ComparisonStatus;

    const NCM_JSON: &str = r#"[
        {
            "codigo": "02.01",
            "descricao": "Carnes de animais da espécie bovina, frescas ou refrigeradas",
            "data_inicio": "01/04/2022",
            "data_fim": "31/12/9999",
            "tipo_ato_ini": "Res Camex",
            "numero_ato_ini": "272",
            "ano_ato_ini": "2021"
        },
        {
            "codigo": "02.01.10",
            "descricao": "- Carcaças e meias-carcaças",
            "data_inicio": "01/04/2022",
            "data_fim": "31/12/9999",
            "tipo_ato_ini": "Res Camex",
            "numero_ato_ini": "272",
            "ano_ato_ini": "2021",
            "csts": [{ "codigo": "200", "descricao": "Alíquota reduzida" }],
            "aliquotaCBS": 3.54,
            "aliquotaIBS": 7.06
        },
        {
            "codigo": "02.02",
            "descricao": "Carnes de animais da espécie bovina, congeladas",
            "data_inicio": "01/04/2022",
            "data_fim": "31/12/9999",
            "tipo_ato_ini": "Res Camex",
            "numero_ato_ini": "272",
            "ano_ato_ini": "2021"
        }
    ]"#;

    // =========================================================================
    // builtin data tests
    // =========================================================================

    #[test]
    fn builtin_catalog_has_every_dataset() {
        let catalog = ReferenceCatalog::builtin();

        assert_eq!(catalog.ncm_entries().len(), 5);
        assert_eq!(catalog.cst_entries().len(), 8);
        assert_eq!(catalog.rate_comparisons().len(), 6);
        assert_eq!(catalog.regimes().len(), 3);
        assert_eq!(catalog.sources().len(), 6);
    }

    // =========================================================================
    // search tests
    // =========================================================================

    #[test]
    fn search_ncm_matches_description_case_insensitively() {
        let catalog = ReferenceCatalog::builtin();

        let results = catalog.search_ncm("CERVEJAS");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code, "2203.00.00");
    }

    #[test]
    fn search_ncm_matches_code_fragment() {
        let catalog = ReferenceCatalog::builtin();

        let codes: Vec<_> = catalog
            .search_ncm("8471")
            .iter()
            .map(|e| e.code.as_str())
            .collect();

        assert_eq!(codes, vec!["8471.30.12"]);
    }

    #[test]
    fn search_ncm_empty_term_returns_everything() {
        let catalog = ReferenceCatalog::builtin();

        assert_eq!(catalog.search_ncm("").len(), 5);
        assert_eq!(catalog.search_ncm("   ").len(), 5);
    }

    #[test]
    fn search_ncm_handles_accented_text() {
        let catalog = ReferenceCatalog::builtin();

        let results = catalog.search_ncm("AUTOMÓVEIS");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code, "8703.23.10");
    }

    #[test]
    fn search_cst_matches_code_description_and_kind() {
        let catalog = ReferenceCatalog::builtin();

        assert_eq!(catalog.search_cst("isenta").len(), 2);
        assert_eq!(catalog.search_cst("51")[0].description, "Diferimento");
        assert_eq!(catalog.search_cst("entrada").len(), 8);
    }

    #[test]
    fn search_cst_without_match_is_empty() {
        let catalog = ReferenceCatalog::builtin();

        assert!(catalog.search_cst("zzz").is_empty());
    }

    #[test]
    fn builtin_comparison_statuses() {
        let catalog = ReferenceCatalog::builtin();

        let status_of = |tax: &str| {
            catalog
                .rate_comparisons()
                .iter()
                .find(|row| row.tax == tax)
                .map(RateComparison::status)
        };

        assert_eq!(status_of("PIS/COFINS"), Some(ComparisonStatus::Replaced));
        assert_eq!(status_of("CBS"), Some(ComparisonStatus::NewTax));
        assert_eq!(status_of("IBS"), Some(ComparisonStatus::NewTax));
        assert_eq!(status_of("ICMS"), Some(ComparisonStatus::Replaced));
    }

    // =========================================================================
    // grouped search tests
    // =========================================================================

    #[test]
    fn grouped_search_nests_subcategories_under_top_level() {
        let catalog = ReferenceCatalog::from_ncm_json(NCM_JSON.as_bytes()).unwrap();

        let groups = catalog.search_ncm_grouped("");

        let bases: Vec<_> = groups.iter().map(|g| g.base.code.as_str()).collect();
        assert_eq!(bases, vec!["02.01", "02.02"]);
        assert_eq!(groups[0].subcategories[0].code, "02.01.10");
        assert!(groups[1].subcategories.is_empty());
    }

    #[test]
    fn grouped_search_lists_parent_of_matching_subcategory() {
        let catalog = ReferenceCatalog::from_ncm_json(NCM_JSON.as_bytes()).unwrap();

        let groups = catalog.search_ncm_grouped("carcaças");

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].base.code, "02.01");
        assert_eq!(groups[0].subcategories.len(), 1);
    }

    #[test]
    fn grouped_search_without_match_is_empty() {
        let catalog = ReferenceCatalog::from_ncm_json(NCM_JSON.as_bytes()).unwrap();

        assert!(catalog.search_ncm_grouped("suínos").is_empty());
    }

    #[test]
    fn grouped_search_treats_unrelated_builtin_codes_as_top_level() {
        let catalog = ReferenceCatalog::builtin();

        let groups = catalog.search_ncm_grouped("");

        assert_eq!(groups.len(), 5);
        assert!(groups.iter().all(|g| g.subcategories.is_empty()));
    }

    // =========================================================================
    // NCM document tests
    // =========================================================================

    #[test]
    fn parse_ncm_json_reads_optional_fields() {
        let entries = ReferenceCatalog::parse_ncm_json(NCM_JSON.as_bytes()).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].act_type.as_deref(), Some("Res Camex"));
        assert_eq!(entries[0].component_a_rate, None);
        assert!(entries[0].csts.is_empty());
        assert_eq!(entries[1].component_a_rate, Some(dec!(3.54)));
        assert_eq!(entries[1].component_b_rate, Some(dec!(7.06)));
        assert_eq!(entries[1].csts[0].code, "200");
    }

    #[test]
    fn parse_ncm_json_rejects_malformed_document() {
        let result = ReferenceCatalog::parse_ncm_json(r#"{"codigo": "02"}"#.as_bytes());

        assert!(matches!(result, Err(ReferenceLoadError::Json(_))));
    }

    #[test]
    fn ncm_with_subcategories_collects_nested_codes() {
        let catalog = ReferenceCatalog::from_ncm_json(NCM_JSON.as_bytes()).unwrap();

        let detail = catalog.ncm_with_subcategories("02.01").unwrap();

        assert_eq!(detail.base.code, "02.01");
        let subs: Vec<_> = detail.subcategories.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(subs, vec!["02.01.10"]);
    }

    #[test]
    fn ncm_with_subcategories_unknown_code_is_none() {
        let catalog = ReferenceCatalog::from_ncm_json(NCM_JSON.as_bytes()).unwrap();

        assert!(catalog.ncm_with_subcategories("02.03").is_none());
        assert!(catalog.ncm_with_subcategories("02.0").is_none());
    }

    #[test]
    fn from_ncm_json_keeps_builtin_cst_data() {
        let catalog = ReferenceCatalog::from_ncm_json(NCM_JSON.as_bytes()).unwrap();

        assert_eq!(catalog.ncm_entries().len(), 3);
        assert_eq!(catalog.cst_entries().len(), 8);
    }
}
