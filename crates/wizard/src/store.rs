use thesis_core::{ThesisData, ThesisUpdate};
use tracing::debug;

use crate::manifesto::Draft;

/// Owner of the thesis document for one wizard session.
///
/// Writes replace a whole top-level field and are not validated; the
/// completeness rules decide separately whether a step may advance.
#[derive(Debug, Clone, Default)]
pub struct ThesisStore {
    thesis: ThesisData,
    error: Option<String>,
    generated_manifesto: Option<String>,
}

impl ThesisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing document, e.g. one loaded from disk.
    pub fn from_thesis(thesis: ThesisData) -> Self {
        Self {
            thesis,
            ..Self::default()
        }
    }

    pub fn thesis(&self) -> &ThesisData {
        &self.thesis
    }

    pub fn update(&mut self, update: ThesisUpdate) {
        debug!(field = update.field().as_str(), "Updating thesis field");
        update.apply(&mut self.thesis);
    }

    pub fn update_all(&mut self, updates: impl IntoIterator<Item = ThesisUpdate>) {
        for update in updates {
            self.update(update);
        }
    }

    /// Fresh empty document; the last error and any generated manifesto go
    /// with it.
    pub fn reset(&mut self) {
        debug!("Resetting thesis document");
        *self = Self::default();
    }

    /// Swap in a generated document and its manifesto wholesale.
    pub fn replace(&mut self, thesis: ThesisData, manifesto: String) {
        self.thesis = thesis;
        self.generated_manifesto = Some(manifesto);
        self.error = None;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generated_manifesto(&self) -> Option<&str> {
        self.generated_manifesto.as_deref()
    }

    /// The document in the form the manifesto formatter consumes.
    pub fn draft(&self) -> Draft<'_> {
        match &self.generated_manifesto {
            Some(manifesto) => Draft::Generated {
                thesis: &self.thesis,
                manifesto,
            },
            None => Draft::Manual(&self.thesis),
        }
    }
}
