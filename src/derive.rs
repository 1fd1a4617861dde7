//! Derivation Engine - Document-Ready Values
//!
//! Pure functions of (FormState, ComplianceCatalog). Nothing here can fail:
//! a half-filled form must still preview.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{ComplianceCatalog, ComplianceItem, ItemId};
use crate::state::FormState;

pub const DOCUMENT_ID_PREFIX: &str = "V";
pub const DOCUMENT_ID_DELIMITER: char = '_';
pub const PASS_GLYPH: &str = "✓";
pub const FAIL_GLYPH: &str = "X";

const DATE_SEPARATORS: [char; 3] = ['-', '/', '.'];

/// `V_<date without separators>_<trailer>`. Only visually unique.
pub fn compute_document_id(date: &str, trailer_number: &str) -> String {
    let compact_date: String = date.chars()
        .filter(|c| !DATE_SEPARATORS.contains(c))
        .collect();
    format!(
        "{}{}{}{}{}",
        DOCUMENT_ID_PREFIX, DOCUMENT_ID_DELIMITER, compact_date, DOCUMENT_ID_DELIMITER, trailer_number
    )
}

/// Failed items in catalog order, whatever order they were toggled in
pub fn compute_failures<'a>(
    checklist: &BTreeMap<ItemId, bool>,
    catalog: &'a ComplianceCatalog,
) -> Vec<&'a ComplianceItem> {
    catalog.list_items()
        .iter()
        .filter(|item| checklist.get(&item.id) == Some(&false))
        .collect()
}

pub fn compute_glyph(passed: bool) -> &'static str {
    if passed { PASS_GLYPH } else { FAIL_GLYPH }
}

pub fn compute_pass_count(checklist: &BTreeMap<ItemId, bool>, catalog: &ComplianceCatalog) -> usize {
    catalog.ids()
        .filter(|id| checklist.get(id) == Some(&true))
        .count()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistEntry {
    pub item: ComplianceItem,
    pub passed: bool,
    pub glyph: String,
}

/// Everything a renderer needs beyond the raw fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView {
    pub document_id: String,
    pub failed_items: Vec<ComplianceItem>,
    pub pass_count: usize,
    pub checklist: Vec<ChecklistEntry>,
}

impl DerivedView {
    pub fn derive(state: &FormState, catalog: &ComplianceCatalog) -> Self {
        let fields = state.fields();
        let checklist = catalog.list_items()
            .iter()
            .map(|item| {
                let passed = state.is_passed(item.id).unwrap_or(true);
                ChecklistEntry {
                    item: item.clone(),
                    passed,
                    glyph: compute_glyph(passed).to_string(),
                }
            })
            .collect();

        Self {
            document_id: compute_document_id(&fields.date, &fields.trailer_number),
            failed_items: compute_failures(state.checklist(), catalog)
                .into_iter()
                .cloned()
                .collect(),
            pass_count: compute_pass_count(state.checklist(), catalog),
            checklist,
        }
    }
}
