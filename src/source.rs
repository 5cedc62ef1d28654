//! The seam to the external content CRUD layer.
//!
//! The engine never talks to a network or a disk; it loads canvas data
//! through this trait during a canvas switch and otherwise receives card
//! snapshots pushed by the embedder. No retry logic is assumed on either
//! side of the seam.

use std::collections::HashMap;

use crate::error::{SourceError, SourceResult};
use crate::types::{Card, CanvasSettings};

/// Supplies card and viewport snapshots for canvases, keyed by canvas id.
pub trait ContentSource {
    /// All cards of a canvas.
    fn load_cards(&self, canvas_id: &str) -> SourceResult<Vec<Card>>;

    /// The canvas's persisted viewport settings.
    fn load_settings(&self, canvas_id: &str) -> SourceResult<CanvasSettings>;
}

/// In-memory [`ContentSource`] for tests and local embedding.
#[derive(Default)]
pub struct MemorySource {
    cards: HashMap<String, Vec<Card>>,
    settings: HashMap<String, CanvasSettings>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_canvas(&mut self, canvas_id: impl Into<String>, cards: Vec<Card>) {
        self.cards.insert(canvas_id.into(), cards);
    }

    pub fn put_settings(&mut self, canvas_id: impl Into<String>, settings: CanvasSettings) {
        self.settings.insert(canvas_id.into(), settings);
    }
}

impl ContentSource for MemorySource {
    fn load_cards(&self, canvas_id: &str) -> SourceResult<Vec<Card>> {
        // A canvas nothing has been stored for yet is empty, not an error,
        // so freshly created canvases are immediately switchable.
        Ok(self.cards.get(canvas_id).cloned().unwrap_or_default())
    }

    fn load_settings(&self, canvas_id: &str) -> SourceResult<CanvasSettings> {
        // A canvas without persisted settings starts at the default viewport.
        Ok(self
            .settings
            .get(canvas_id)
            .cloned()
            .unwrap_or_default())
    }
}
