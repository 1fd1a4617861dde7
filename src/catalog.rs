//! Compliance Catalog - Fixed Inspection Criteria
//!
//! Every trailer is checked against the same seven items, in the same order.

use serde::{Deserialize, Serialize};

pub type ItemId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceItem {
    pub id: ItemId,
    pub label: String,
    pub failure_remark: String,
}

impl ComplianceItem {
    fn new(id: ItemId, label: &str, failure_remark: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            failure_remark: failure_remark.to_string(),
        }
    }
}

/// The compiled-in catalog. Items are kept sorted by id.
#[derive(Debug, Clone)]
pub struct ComplianceCatalog {
    items: Vec<ComplianceItem>,
}

impl ComplianceCatalog {
    pub fn new() -> Self {
        Self {
            items: vec![
                ComplianceItem::new(1, "Incoming Trailer in Good Condition", "Trailer damaged/unfit"),
                ComplianceItem::new(2, "Cleanliness (No Contamination Risk)", "Dirt/Debris found"),
                ComplianceItem::new(3, "Structural Concerns (Holes/Damage)", "Visible holes in wall"),
                ComplianceItem::new(4, "Free of Pest Infestation", "Pest activity noticed"),
                ComplianceItem::new(5, "Within Temperature Range", "Temp above 4°C"),
                ComplianceItem::new(6, "No Damage to Product/Packaging", "Damaged cases found"),
                ComplianceItem::new(7, "Free of Chemical Contamination", "Chemical smell detected"),
            ],
        }
    }

    /// All items in catalog order
    pub fn list_items(&self) -> &[ComplianceItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&ComplianceItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|item| item.id)
    }
}

impl Default for ComplianceCatalog {
    fn default() -> Self {
        Self::new()
    }
}
