//! Print Layout - Plain-Text Sheets
//!
//! Lays a `DocumentView` out as monospaced text for a print subsystem.
//! Pagination and the physical print call belong to the receiver.

use serde::{Deserialize, Serialize};

use crate::render::{Block, BlockContent, DocumentView, Table};

const CHARS_PER_INCH: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSize {
    pub width_inches: f64,
    pub height_inches: f64,
}

impl PageSize {
    pub const LETTER: PageSize = PageSize { width_inches: 8.5, height_inches: 11.0 };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintSheet {
    pub page: PageSize,
    pub margin_inches: f64,
}

impl Default for PrintSheet {
    fn default() -> Self {
        Self {
            page: PageSize::LETTER,
            margin_inches: 0.5,
        }
    }
}

impl PrintSheet {
    /// Text columns available between the margins
    pub fn columns(&self) -> usize {
        let printable = (self.page.width_inches - 2.0 * self.margin_inches).max(0.0);
        (printable * CHARS_PER_INCH) as usize
    }

    pub fn render_text(&self, view: &DocumentView) -> String {
        let width = self.columns();
        let mut lines = vec![center(&view.title, width)];
        if let Some(subtitle) = &view.subtitle {
            lines.push(center(subtitle, width));
        }
        lines.push("=".repeat(width));

        for block in &view.blocks {
            lines.extend(block_lines(block));
            lines.push(String::new());
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

fn block_lines(block: &Block) -> Vec<String> {
    let heading = block.heading.iter().map(|h| format!("{}:", h.to_uppercase()));
    let body = match &block.content {
        BlockContent::Fields(fields) => fields.iter()
            .map(|field| format!("{}: {}", field.label, field.value))
            .collect(),
        BlockContent::Lines(lines) => lines.clone(),
        BlockContent::Checklist(entries) => entries.iter()
            .map(|entry| format!("{}. {} [{}]", entry.item.id, entry.item.label, entry.glyph))
            .collect(),
        BlockContent::Table(table) => table_lines(table),
    };
    heading.chain(body).collect()
}

fn table_lines(table: &Table) -> Vec<String> {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.cells.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells.iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{}{}", cell, " ".repeat(w - cell.chars().count())))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let mut lines = vec![
        format_row(&table.columns),
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"),
    ];
    lines.extend(table.rows.iter().map(|row| format_row(&row.cells)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ComplianceCatalog;
    use crate::config::DocumentConfig;
    use crate::render::render_document;
    use crate::state::{DocumentMode, FormState};

    #[test]
    fn test_letter_columns() {
        assert_eq!(PrintSheet::default().columns(), 75);
    }

    #[test]
    fn test_temperature_log_text() {
        let catalog = ComplianceCatalog::new();
        let mut state = FormState::with_date(&catalog, "2024-05-01");
        state.set_field_by_name("trailerNumber", "T123").unwrap();
        state.toggle_check(3).unwrap();

        let view = render_document(&state, &catalog, &DocumentConfig::default());
        let text = PrintSheet::default().render_text(&view);

        assert!(text.contains("TRAILER LOADING & TEMP LOG"));
        assert!(text.contains("3. Structural Concerns (Holes/Damage) [X]"));
        assert!(text.contains("Visible holes in wall"));
        assert!(text.contains("Supervisor Name: "));
    }

    #[test]
    fn test_bill_of_lading_text() {
        let catalog = ComplianceCatalog::new();
        let mut state = FormState::with_date(&catalog, "2024-05-01");
        state.set_mode(DocumentMode::BillOfLading);

        let view = render_document(&state, &catalog, &DocumentConfig::default());
        let text = PrintSheet::default().render_text(&view);

        assert!(text.contains("SHIP FROM:\nVaughan CFC\n"));
        assert!(text.contains("SHIP TO:\nOttawa Spoke\n"));
        assert!(text.contains("BOL #: V_20240501_"));
        assert!(text.contains("36  | Frames |"));
    }

    #[test]
    fn test_table_layout_exact() {
        let catalog = ComplianceCatalog::new();
        let mut state = FormState::with_date(&catalog, "2024-05-01");
        state.set_field_by_name("trailerNumber", "T123").unwrap();
        state.set_field_by_name("temperature", "3").unwrap();
        state.set_field_by_name("initials", "JD").unwrap();
        state.toggle_check(6).unwrap();

        let view = render_document(&state, &catalog, &DocumentConfig::default());
        let text = PrintSheet::default().render_text(&view);

        let expected = [
            "Trailer # | Temperature (°C) | Comply? (Y/N) | Comments / Deviation | Initials",
            "----------+------------------+---------------+----------------------+---------",
            "T123      | 3°C              | Y             | Within Range         | JD      ",
            "T123      | -                | N             | Damaged cases found  | JD      ",
        ]
        .join("\n");
        assert!(text.contains(&expected), "unexpected layout:\n{}", text);
        assert!(text.ends_with("Supervisor Name: \n\n"));
    }
}
