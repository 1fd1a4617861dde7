//! Template Renderers - One Strategy Per Document Mode
//!
//! Renderers read state and derived values; they never mutate either.
//! Selection is by `DocumentMode` only, so adding a mode means adding a renderer.

use serde::{Deserialize, Serialize};

use crate::catalog::ComplianceCatalog;
use crate::config::DocumentConfig;
use crate::derive::{ChecklistEntry, DerivedView, FAIL_GLYPH, PASS_GLYPH};
use crate::state::{DocumentMode, FormState};

pub const BILL_OF_LADING_TITLE: &str = "STRAIGHT BILL OF LADING";
pub const BILL_OF_LADING_SUBTITLE: &str = "Original - Not Negotiable";
pub const TEMPERATURE_LOG_TITLE: &str = "TRAILER LOADING & TEMP LOG";
pub const COMPLIANT_MARKER: &str = "Y";
pub const NON_COMPLIANT_MARKER: &str = "N";
pub const WITHIN_RANGE_REMARK: &str = "Within Range";
pub const NO_READING: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Header,
    Origin,
    Carrier,
    Destination,
    Commodity,
    Legend,
    Checklist,
    LogTable,
    Signature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

impl LabeledValue {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self { label: label.to_string(), value: value.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowKind {
    Primary,
    Failure,
    LineItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub kind: RowKind,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl Table {
    fn new(columns: &[&str], rows: Vec<TableRow>) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    pub fn rows_of(&self, kind: RowKind) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(move |row| row.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum BlockContent {
    Fields(Vec<LabeledValue>),
    Lines(Vec<String>),
    Checklist(Vec<ChecklistEntry>),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    #[serde(default)]
    pub heading: Option<String>,
    pub content: BlockContent,
}

impl Block {
    fn new(kind: BlockKind, heading: Option<&str>, content: BlockContent) -> Self {
        Self { kind, heading: heading.map(str::to_string), content }
    }
}

/// A fully laid-out document, ready for a print subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub mode: DocumentMode,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub blocks: Vec<Block>,
}

impl DocumentView {
    pub fn block(&self, kind: BlockKind) -> Option<&Block> {
        self.blocks.iter().find(|b| b.kind == kind)
    }

    /// Table carried by the block of this kind, if it is one
    pub fn table(&self, kind: BlockKind) -> Option<&Table> {
        match self.block(kind).map(|b| &b.content) {
            Some(BlockContent::Table(table)) => Some(table),
            _ => None,
        }
    }
}

/// Renderer trait - one implementation per document mode
pub trait DocumentRenderer {
    fn mode(&self) -> DocumentMode;
    fn render(&self, state: &FormState, derived: &DerivedView, config: &DocumentConfig) -> DocumentView;
}

// --- Concrete Renderers ---

pub struct BillOfLadingRenderer;

impl DocumentRenderer for BillOfLadingRenderer {
    fn mode(&self) -> DocumentMode { DocumentMode::BillOfLading }

    fn render(&self, state: &FormState, derived: &DerivedView, config: &DocumentConfig) -> DocumentView {
        let fields = state.fields();
        let commodity = &config.commodity;

        DocumentView {
            mode: self.mode(),
            title: BILL_OF_LADING_TITLE.to_string(),
            subtitle: Some(BILL_OF_LADING_SUBTITLE.to_string()),
            blocks: vec![
                Block::new(BlockKind::Header, None, BlockContent::Fields(vec![
                    LabeledValue::new("Date", fields.date.as_str()),
                    LabeledValue::new("BOL #", derived.document_id.as_str()),
                ])),
                Block::new(BlockKind::Origin, Some("Ship From"), BlockContent::Lines(config.origin.clone())),
                Block::new(BlockKind::Carrier, None, BlockContent::Fields(vec![
                    LabeledValue::new("Carrier", config.carrier.as_str()),
                    LabeledValue::new("Trailer No", fields.trailer_number.as_str()),
                    LabeledValue::new("Seal No", fields.seal_number.as_str()),
                ])),
                Block::new(
                    BlockKind::Destination,
                    Some("Ship To"),
                    BlockContent::Lines(vec![state.destination().label().to_string()]),
                ),
                Block::new(BlockKind::Commodity, None, BlockContent::Table(Table::new(
                    &["QTY", "Type", "Commodity Description", "Weight"],
                    vec![TableRow {
                        kind: RowKind::LineItem,
                        cells: vec![
                            commodity.quantity.clone(),
                            commodity.package_type.clone(),
                            commodity.description.clone(),
                            commodity.weight.clone(),
                        ],
                    }],
                ))),
            ],
        }
    }
}

pub struct TemperatureLogRenderer;

impl TemperatureLogRenderer {
    fn log_rows(state: &FormState, derived: &DerivedView) -> Vec<TableRow> {
        let fields = state.fields();
        let primary = TableRow {
            kind: RowKind::Primary,
            cells: vec![
                fields.trailer_number.clone(),
                format!("{}°C", fields.temperature),
                COMPLIANT_MARKER.to_string(),
                WITHIN_RANGE_REMARK.to_string(),
                fields.initials.clone(),
            ],
        };

        let failures = derived.failed_items.iter().map(|item| TableRow {
            kind: RowKind::Failure,
            cells: vec![
                fields.trailer_number.clone(),
                NO_READING.to_string(),
                NON_COMPLIANT_MARKER.to_string(),
                item.failure_remark.clone(),
                fields.initials.clone(),
            ],
        });

        std::iter::once(primary).chain(failures).collect()
    }
}

impl DocumentRenderer for TemperatureLogRenderer {
    fn mode(&self) -> DocumentMode { DocumentMode::TemperatureLog }

    fn render(&self, state: &FormState, derived: &DerivedView, _config: &DocumentConfig) -> DocumentView {
        let fields = state.fields();

        DocumentView {
            mode: self.mode(),
            title: TEMPERATURE_LOG_TITLE.to_string(),
            subtitle: None,
            blocks: vec![
                Block::new(BlockKind::Header, None, BlockContent::Fields(vec![
                    LabeledValue::new("Date", fields.date.as_str()),
                    LabeledValue::new("Time", fields.time.as_str()),
                    LabeledValue::new("Trailer", fields.trailer_number.as_str()),
                ])),
                Block::new(BlockKind::Legend, None, BlockContent::Lines(vec![format!(
                    "Trailer Standards ({} = Pass, {} = Fail):",
                    PASS_GLYPH, FAIL_GLYPH
                )])),
                Block::new(BlockKind::Checklist, None, BlockContent::Checklist(derived.checklist.clone())),
                Block::new(BlockKind::LogTable, None, BlockContent::Table(Table::new(
                    &["Trailer #", "Temperature (°C)", "Comply? (Y/N)", "Comments / Deviation", "Initials"],
                    Self::log_rows(state, derived),
                ))),
                Block::new(BlockKind::Signature, None, BlockContent::Fields(vec![
                    LabeledValue::new("Supervisor Name", fields.supervisor_name.as_str()),
                ])),
            ],
        }
    }
}

static BILL_OF_LADING: BillOfLadingRenderer = BillOfLadingRenderer;
static TEMPERATURE_LOG: TemperatureLogRenderer = TemperatureLogRenderer;

pub fn renderer_for(mode: DocumentMode) -> &'static dyn DocumentRenderer {
    match mode {
        DocumentMode::BillOfLading => &BILL_OF_LADING,
        DocumentMode::TemperatureLog => &TEMPERATURE_LOG,
    }
}

/// Derive and render the active template in one step
pub fn render_document(state: &FormState, catalog: &ComplianceCatalog, config: &DocumentConfig) -> DocumentView {
    let derived = DerivedView::derive(state, catalog);
    let view = renderer_for(state.mode()).render(state, &derived, config);
    tracing::debug!(
        mode = %state.mode(),
        document_id = %derived.document_id,
        failures = derived.failed_items.len(),
        "rendered document"
    );
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DestinationCode, FieldValue};
    use pretty_assertions::assert_eq;

    fn filled_state() -> (ComplianceCatalog, FormState) {
        let catalog = ComplianceCatalog::new();
        let mut state = FormState::with_date(&catalog, "2024-05-01");
        state.set_field(FieldValue::TrailerNumber("T123".to_string()));
        state.set_field(FieldValue::Temperature("3".to_string()));
        state.set_field(FieldValue::Initials("JD".to_string()));
        state.set_field(FieldValue::SealNumber("S-88".to_string()));
        state.set_field(FieldValue::SupervisorName("Pat Lee".to_string()));
        (catalog, state)
    }

    #[test]
    fn test_renderer_selection() {
        assert_eq!(renderer_for(DocumentMode::BillOfLading).mode(), DocumentMode::BillOfLading);
        assert_eq!(renderer_for(DocumentMode::TemperatureLog).mode(), DocumentMode::TemperatureLog);
    }

    #[test]
    fn test_temperature_log_all_pass() {
        let (catalog, state) = filled_state();
        let view = render_document(&state, &catalog, &DocumentConfig::default());

        assert_eq!(view.title, TEMPERATURE_LOG_TITLE);
        let table = view.table(BlockKind::LogTable).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cells, vec!["T123", "3°C", "Y", "Within Range", "JD"]);
    }

    #[test]
    fn test_temperature_log_failure_rows() {
        let (catalog, mut state) = filled_state();
        state.toggle_check(6).unwrap();
        state.toggle_check(3).unwrap();

        let view = render_document(&state, &catalog, &DocumentConfig::default());
        let table = view.table(BlockKind::LogTable).unwrap();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].kind, RowKind::Primary);
        assert_eq!(table.rows[1].cells, vec!["T123", "-", "N", "Visible holes in wall", "JD"]);
        assert_eq!(table.rows[2].cells, vec!["T123", "-", "N", "Damaged cases found", "JD"]);
    }

    #[test]
    fn test_checklist_echo() {
        let (catalog, mut state) = filled_state();
        state.toggle_check(2).unwrap();

        let view = render_document(&state, &catalog, &DocumentConfig::default());
        let block = view.block(BlockKind::Checklist).unwrap();
        let BlockContent::Checklist(entries) = &block.content else {
            panic!("checklist block has wrong content");
        };
        let glyphs: Vec<_> = entries.iter().map(|e| e.glyph.as_str()).collect();
        assert_eq!(glyphs, vec!["✓", "X", "✓", "✓", "✓", "✓", "✓"]);
    }

    #[test]
    fn test_bill_of_lading_blocks() {
        let (catalog, mut state) = filled_state();
        state.set_mode(DocumentMode::BillOfLading);
        state.set_destination(DestinationCode::EtobicokeSpoke);

        let view = render_document(&state, &catalog, &DocumentConfig::default());
        assert_eq!(view.title, BILL_OF_LADING_TITLE);
        assert_eq!(
            view.block(BlockKind::Header).unwrap().content,
            BlockContent::Fields(vec![
                LabeledValue::new("Date", "2024-05-01"),
                LabeledValue::new("BOL #", "V_20240501_T123"),
            ])
        );
        assert_eq!(
            view.block(BlockKind::Destination).unwrap().content,
            BlockContent::Lines(vec!["Etobicoke Spoke".to_string()])
        );
        let commodity = view.table(BlockKind::Commodity).unwrap();
        assert_eq!(commodity.rows.len(), 1);
        assert_eq!(commodity.rows[0].cells, vec!["36", "Frames", "Mixed Grocery - Perishable", "28,440 lbs"]);
    }

    #[test]
    fn test_destination_change_touches_one_block() {
        let (catalog, mut state) = filled_state();
        let config = DocumentConfig::default();
        state.set_mode(DocumentMode::BillOfLading);
        state.set_destination(DestinationCode::EtobicokeSpoke);
        let before = render_document(&state, &catalog, &config);

        state.set_destination(DestinationCode::OttawaSpoke);
        let after = render_document(&state, &catalog, &config);

        assert_eq!(before.blocks.len(), after.blocks.len());
        for (a, b) in before.blocks.iter().zip(&after.blocks) {
            if a.kind == BlockKind::Destination {
                assert_ne!(a, b);
            } else {
                assert_eq!(a, b);
            }
        }
        assert_eq!(
            after.block(BlockKind::Destination).unwrap().content,
            BlockContent::Lines(vec!["Ottawa Spoke".to_string()])
        );
    }
}
