//! Form Session - Single Owner of the Form State
//!
//! Edits go in one at a time; every preview is derived fresh from the
//! current state. Nothing is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::ComplianceCatalog;
use crate::config::DocumentConfig;
use crate::hashing::compute_view_fingerprint;
use crate::render::{render_document, DocumentView};
use crate::state::{DocumentMode, FormEdit, FormError, FormState};
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Edit {index} rejected: {source}")]
    EditRejected {
        index: usize,
        #[source]
        source: FormError,
    },
}

/// A rendered document plus the envelope a preview loop needs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    pub session_id: Uuid,
    pub engine_version: String,
    pub mode: DocumentMode,
    pub rendered_at: DateTime<Utc>,
    pub fingerprint: String,
    pub view: DocumentView,
}

pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    catalog: ComplianceCatalog,
    config: DocumentConfig,
    state: FormState,
}

impl Session {
    pub fn new(config: DocumentConfig) -> Self {
        let catalog = ComplianceCatalog::new();
        let state = FormState::new(&catalog);
        Self::from_parts(catalog, config, state)
    }

    /// Session starting from a given date instead of today
    pub fn with_date(config: DocumentConfig, date: impl Into<String>) -> Self {
        let catalog = ComplianceCatalog::new();
        let state = FormState::with_date(&catalog, date);
        Self::from_parts(catalog, config, state)
    }

    fn from_parts(catalog: ComplianceCatalog, config: DocumentConfig, state: FormState) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            catalog,
            config,
            state,
        };
        tracing::info!(session_id = %session.id, "form session started");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn catalog(&self) -> &ComplianceCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    /// Apply one edit. A rejected edit leaves the state unchanged.
    pub fn apply(&mut self, edit: FormEdit) -> Result<(), FormError> {
        self.state.apply(edit).map_err(|e| {
            tracing::warn!(session_id = %self.id, error = %e, "edit rejected");
            e
        })
    }

    /// Apply edits in order, stopping at the first rejection.
    /// Edits before the rejected one stay applied.
    pub fn apply_all(&mut self, edits: impl IntoIterator<Item = FormEdit>) -> Result<usize, SessionError> {
        let mut applied = 0;
        for (index, edit) in edits.into_iter().enumerate() {
            self.apply(edit)
                .map_err(|source| SessionError::EditRejected { index, source })?;
            applied += 1;
        }
        Ok(applied)
    }

    pub fn view(&self) -> DocumentView {
        render_document(&self.state, &self.catalog, &self.config)
    }

    pub fn preview(&self) -> RenderedDocument {
        let view = self.view();
        let fingerprint = compute_view_fingerprint(&view);

        RenderedDocument {
            session_id: self.id,
            engine_version: ENGINE_VERSION.to_string(),
            mode: self.state.mode(),
            rendered_at: Utc::now(),
            fingerprint,
            view,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DocumentConfig::default())
    }
}
