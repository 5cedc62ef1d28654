//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestWorkspaceBuilder` - builder for a workspace session with canvases
//! - Card constructors like `text_card()`, `code_card()`, `locked_card()`
//! - `session_with_cards()` for the common single-canvas case

use cardboard::canvas_index::CanvasIndex;
use cardboard::source::MemorySource;
use cardboard::types::{Card, CardContent, CanvasSettings};
use cardboard::workspace::WorkspaceSession;

pub const WORKSPACE: &str = "ws-test";

// ============================================================================
// Card constructors
// ============================================================================

pub fn text_card(id: u64, pos: (f32, f32)) -> Card {
    Card::new(id, pos, CardContent::Text { text: format!("note {}", id) })
}

pub fn code_card(id: u64, pos: (f32, f32)) -> Card {
    Card::new(
        id,
        pos,
        CardContent::Code { code: "fn main() {}".into(), language: "rust".into() },
    )
}

pub fn link_card(id: u64, pos: (f32, f32)) -> Card {
    Card::new(
        id,
        pos,
        CardContent::Link { url: "https://example.com".into(), title: None },
    )
}

pub fn image_card(id: u64, pos: (f32, f32)) -> Card {
    Card::new(
        id,
        pos,
        CardContent::Image { url: "sunset.png".into(), caption: Some("sunset".into()) },
    )
}

pub fn locked_card(id: u64, pos: (f32, f32)) -> Card {
    let mut card = text_card(id, pos);
    card.locked = true;
    card
}

pub fn hidden_card(id: u64, pos: (f32, f32)) -> Card {
    let mut card = text_card(id, pos);
    card.hidden = true;
    card
}

/// N text cards in a horizontal strip, ids 1..=n, 400 units apart so their
/// default sizes never overlap.
pub fn card_strip(n: u64) -> Vec<Card> {
    (1..=n).map(|i| text_card(i, ((i - 1) as f32 * 400.0, 0.0))).collect()
}

// ============================================================================
// TestWorkspaceBuilder
// ============================================================================

/// Builder for a workspace session backed by a `MemorySource`.
///
/// # Example
/// ```ignore
/// let (mut session, ids) = TestWorkspaceBuilder::new()
///     .with_canvas("Main", card_strip(3))
///     .with_canvas("Scratch", vec![])
///     .build();
/// session.switch_to_canvas(&ids[0]).unwrap();
/// ```
pub struct TestWorkspaceBuilder {
    canvases: Vec<(String, Vec<Card>, Option<CanvasSettings>)>,
}

impl Default for TestWorkspaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspaceBuilder {
    pub fn new() -> Self {
        Self { canvases: Vec::new() }
    }

    pub fn with_canvas(mut self, name: impl Into<String>, cards: Vec<Card>) -> Self {
        self.canvases.push((name.into(), cards, None));
        self
    }

    pub fn with_canvas_and_settings(
        mut self,
        name: impl Into<String>,
        cards: Vec<Card>,
        settings: CanvasSettings,
    ) -> Self {
        self.canvases.push((name.into(), cards, Some(settings)));
        self
    }

    /// Build the session plus the created canvas ids, in declaration order.
    /// The first canvas is the workspace default; no canvas is active yet.
    pub fn build(self) -> (WorkspaceSession<MemorySource>, Vec<String>) {
        cardboard::init_logging();

        let mut index = CanvasIndex::new();
        let mut source = MemorySource::new();
        let mut ids = Vec::new();

        for (name, cards, settings) in self.canvases {
            let meta = index.create_canvas(WORKSPACE, name);
            source.put_canvas(meta.id.clone(), cards);
            if let Some(settings) = settings {
                source.put_settings(meta.id.clone(), settings);
            }
            ids.push(meta.id);
        }

        (WorkspaceSession::new(WORKSPACE, source, index), ids)
    }
}

/// Single-canvas session, already switched to that canvas.
pub fn session_with_cards(cards: Vec<Card>) -> WorkspaceSession<MemorySource> {
    let (mut session, ids) = TestWorkspaceBuilder::new().with_canvas("Main", cards).build();
    session
        .switch_to_canvas(&ids[0])
        .expect("test canvas loads");
    session
}
