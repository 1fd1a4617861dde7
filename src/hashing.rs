//! Fingerprints - SHA-256 over Rendered Documents
//!
//! A preview loop compares fingerprints to tell whether the document changed.
//! Every string is length-prefixed so adjacent values cannot run together.

use sha2::{Digest, Sha256};

use crate::render::{Block, BlockContent, DocumentView, Table};

struct ViewHasher(Sha256);

impl ViewHasher {
    fn tag(&mut self, tag: u8) {
        self.0.update([tag]);
    }

    fn count(&mut self, n: usize) {
        self.0.update((n as u64).to_le_bytes());
    }

    fn text(&mut self, s: &str) {
        self.count(s.len());
        self.0.update(s.as_bytes());
    }

    fn texts(&mut self, items: &[String]) {
        self.count(items.len());
        for item in items {
            self.text(item);
        }
    }

    fn block(&mut self, block: &Block) {
        self.tag(block.kind as u8);
        match &block.heading {
            Some(heading) => {
                self.tag(1);
                self.text(heading);
            }
            None => self.tag(0),
        }

        match &block.content {
            BlockContent::Fields(fields) => {
                self.tag(0);
                self.count(fields.len());
                for field in fields {
                    self.text(&field.label);
                    self.text(&field.value);
                }
            }
            BlockContent::Lines(lines) => {
                self.tag(1);
                self.texts(lines);
            }
            BlockContent::Checklist(entries) => {
                self.tag(2);
                self.count(entries.len());
                for entry in entries {
                    self.0.update(entry.item.id.to_le_bytes());
                    self.text(&entry.item.label);
                    self.text(&entry.item.failure_remark);
                    self.tag(entry.passed as u8);
                    self.text(&entry.glyph);
                }
            }
            BlockContent::Table(table) => {
                self.tag(3);
                self.table(table);
            }
        }
    }

    fn table(&mut self, table: &Table) {
        self.texts(&table.columns);
        self.count(table.rows.len());
        for row in &table.rows {
            self.tag(row.kind as u8);
            self.texts(&row.cells);
        }
    }
}

/// Hex SHA-256 of everything a printed page would show
pub fn compute_view_fingerprint(view: &DocumentView) -> String {
    let mut hasher = ViewHasher(Sha256::new());
    hasher.text(&view.mode.to_string());
    hasher.text(&view.title);
    match &view.subtitle {
        Some(subtitle) => {
            hasher.tag(1);
            hasher.text(subtitle);
        }
        None => hasher.tag(0),
    }
    hasher.count(view.blocks.len());
    for block in &view.blocks {
        hasher.block(block);
    }
    hex::encode(hasher.0.finalize())
}
