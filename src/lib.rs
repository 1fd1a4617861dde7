//! Load Form Core - Trailer Paperwork Generator
//!
//! # Ground Rules
//! 1. Capture Once, Render Twice
//! 2. The Catalog Is Fixed
//! 3. Derivation Never Fails
//! 4. Rendering Never Mutates
//! 5. Edits Are Atomic

pub mod catalog;
pub mod config;
pub mod state;
pub mod derive;
pub mod render;
pub mod hashing;
pub mod print;
pub mod session;

pub use catalog::{ComplianceCatalog, ComplianceItem, ItemId};
pub use config::{DocumentConfig, ConfigError};
pub use state::{FormState, FormEdit, FormError, SnapshotError, FieldName, FieldValue, DocumentMode, DestinationCode};
pub use derive::{DerivedView, compute_document_id, compute_failures, compute_glyph};
pub use render::{DocumentRenderer, DocumentView, renderer_for};
pub use hashing::compute_view_fingerprint;
pub use print::PrintSheet;
pub use session::{Session, SessionError, RenderedDocument};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
