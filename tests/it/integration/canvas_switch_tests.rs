//! End-to-end tests for canvas switching.
//!
//! Card ids are canvas-scoped, so every switch must clear interaction state
//! and swap the working set atomically from the observer's point of view.

use std::sync::Arc;

use parking_lot::Mutex;

use cardboard::canvas_index::CanvasIndex;
use cardboard::edit::SaveOutcome;
use cardboard::error::{SourceError, SourceResult, SwitchError};
use cardboard::source::{ContentSource, MemorySource};
use cardboard::types::{Card, CanvasSettings, GridStyle};
use cardboard::workspace::WorkspaceSession;

use crate::helpers::{card_strip, text_card, TestWorkspaceBuilder, WORKSPACE};

/// `MemorySource` behind a shared handle, so tests can add canvas data or
/// inject a load failure after the session has taken ownership of the
/// source.
#[derive(Clone, Default)]
struct SharedSource {
    inner: Arc<Mutex<MemorySource>>,
    broken: Arc<Mutex<Option<String>>>,
}

impl SharedSource {
    fn put_canvas(&self, canvas_id: impl Into<String>, cards: Vec<Card>) {
        self.inner.lock().put_canvas(canvas_id, cards);
    }

    /// Make every load of the given canvas fail until [`repair`](Self::repair).
    fn break_canvas(&self, canvas_id: impl Into<String>) {
        *self.broken.lock() = Some(canvas_id.into());
    }

    fn repair(&self) {
        *self.broken.lock() = None;
    }
}

impl ContentSource for SharedSource {
    fn load_cards(&self, canvas_id: &str) -> SourceResult<Vec<Card>> {
        if self.broken.lock().as_deref() == Some(canvas_id) {
            return Err(SourceError::msg(format!("canvas {canvas_id} unavailable")));
        }
        self.inner.lock().load_cards(canvas_id)
    }

    fn load_settings(&self, canvas_id: &str) -> SourceResult<CanvasSettings> {
        self.inner.lock().load_settings(canvas_id)
    }
}

#[test]
fn test_switch_swaps_working_set_and_clears_interaction() {
    let mut settings_b = CanvasSettings::default();
    settings_b.pan = (500.0, 250.0);
    settings_b.grid = GridStyle::Lines;

    let (mut session, ids) = TestWorkspaceBuilder::new()
        .with_canvas("A", card_strip(3))
        .with_canvas_and_settings("B", vec![text_card(10, (0.0, 0.0))], settings_b.clone())
        .build();
    session.switch_to_canvas(&ids[0]).unwrap();

    // Build up interaction state on A.
    session.select_at(50.0, 50.0, false);
    session.hover_at(450.0, 50.0);
    session.drag_at(850.0, 50.0);
    assert!(session.interaction.drag().is_some());

    let report = session.switch_to_canvas(&ids[1]).unwrap();
    assert_eq!(report.canvas_id, ids[1]);
    assert!(!report.fallback_used);
    assert_eq!(report.card_count, 1);

    // Only B's cards, none of A's state.
    assert_eq!(session.cards.len(), 1);
    assert!(session.cards.contains(10));
    assert!(!session.cards.contains(1));
    assert!(session.interaction.selection().is_empty());
    assert_eq!(session.interaction.hovered(), None);
    assert!(session.interaction.drag().is_none());
    assert_eq!(session.viewport, settings_b);
    assert_eq!(session.active_canvas(), Some(ids[1].as_str()));
}

#[test]
fn test_missing_canvas_falls_back_to_workspace_default() {
    let (mut session, ids) = TestWorkspaceBuilder::new()
        .with_canvas("Main", card_strip(2))
        .with_canvas("Scratch", vec![])
        .build();

    let report = session.switch_to_canvas("no-such-canvas").unwrap();
    assert!(report.fallback_used);
    assert_eq!(report.canvas_id, ids[0]);
    assert_eq!(report.card_count, 2);
}

#[test]
fn test_switch_with_no_canvases_requires_creation() {
    let (mut session, _ids) = TestWorkspaceBuilder::new().build();

    let err = session.switch_to_canvas("anything").unwrap_err();
    assert!(matches!(err, SwitchError::CreationRequired(id) if id == "anything"));
    assert_eq!(session.active_canvas(), None);

    // Creating a canvas unblocks the switch; a fresh canvas is empty, not
    // a load failure.
    let meta = session.create_canvas("First");
    let report = session.switch_to_canvas(&meta.id).unwrap();
    assert_eq!(report.canvas_id, meta.id);
    assert_eq!(report.card_count, 0);
    assert_eq!(session.active_canvas(), Some(meta.id.as_str()));
}

#[test]
fn test_switch_never_crosses_workspace_boundaries() {
    cardboard::init_logging();

    let mut index = CanvasIndex::new();
    let own = index.create_canvas(WORKSPACE, "Mine").id;
    let foreign = index.create_canvas("ws-other", "Theirs").id;

    let mut session = WorkspaceSession::new(WORKSPACE, MemorySource::new(), index);

    // A canvas owned by another workspace is as unreachable as a missing
    // one: the switch lands on this workspace's default instead.
    let report = session.switch_to_canvas(&foreign).unwrap();
    assert!(report.fallback_used);
    assert_eq!(report.canvas_id, own);
    assert_eq!(session.active_canvas(), Some(own.as_str()));

    // With no default to fall back on, the caller is told to create one.
    let mut empty_index = CanvasIndex::new();
    let elsewhere = empty_index.create_canvas("ws-other", "Theirs").id;
    let mut session = WorkspaceSession::new(WORKSPACE, MemorySource::new(), empty_index);
    let err = session.switch_to_canvas(&elsewhere).unwrap_err();
    assert!(matches!(err, SwitchError::CreationRequired(_)));
}

#[test]
fn test_switch_discards_open_edit_session() {
    let (mut session, ids) = TestWorkspaceBuilder::new()
        .with_canvas("A", card_strip(1))
        .with_canvas("B", vec![])
        .build();
    session.switch_to_canvas(&ids[0]).unwrap();

    assert!(session.begin_edit(1));
    session.edit.mark_dirty();

    session.switch_to_canvas(&ids[1]).unwrap();
    assert!(!session.edit.is_active());
    assert_eq!(session.interaction.editing_card(), None);

    // Back on A the card carries its persisted content; the dirty edit was
    // never saved.
    session.switch_to_canvas(&ids[0]).unwrap();
    match session.cards.get(1).unwrap().content.as_ref() {
        cardboard::types::CardContent::Text { text } => assert_eq!(text, "note 1"),
        other => panic!("unexpected content {:?}", other),
    }
}

#[test]
fn test_switch_during_saving_detaches_the_save() {
    let (mut session, ids) = TestWorkspaceBuilder::new()
        .with_canvas("A", card_strip(1))
        .with_canvas("B", vec![])
        .build();
    session.switch_to_canvas(&ids[0]).unwrap();

    assert!(session.begin_edit(1));
    let pending = session.edit.begin_save().unwrap();
    assert_eq!(pending.card_id, 1);

    // The switch cannot cancel an in-flight save.
    session.switch_to_canvas(&ids[1]).unwrap();
    assert!(session.edit.is_saving());

    // The detached save completes later against the new store state.
    let outcome = session.edit.complete_save(&mut session.interaction, Ok(()));
    assert!(matches!(outcome, Some(SaveOutcome::Saved { card_id: 1 })));
    assert!(!session.edit.is_saving());
}

#[test]
fn test_failed_load_leaves_session_cleared_and_retry_safe() {
    cardboard::init_logging();

    let source = SharedSource::default();
    let mut index = CanvasIndex::new();
    let good = index.create_canvas(WORKSPACE, "Good").id;
    let broken = index.create_canvas(WORKSPACE, "Broken").id;
    source.put_canvas(good.clone(), card_strip(2));
    source.put_canvas(broken.clone(), vec![text_card(5, (0.0, 0.0))]);
    source.break_canvas(broken.clone());

    let mut session = WorkspaceSession::new(WORKSPACE, source.clone(), index);
    session.switch_to_canvas(&good).unwrap();
    session.select_at(50.0, 50.0, false);

    let err = session.switch_to_canvas(&broken).unwrap_err();
    assert!(matches!(&err, SwitchError::Load { canvas_id, .. } if *canvas_id == broken));

    // Cleared but pointed at the target: no stale cards from the previous
    // canvas, no interaction state.
    assert_eq!(session.active_canvas(), Some(broken.as_str()));
    assert!(session.cards.is_empty());
    assert!(session.interaction.selection().is_empty());

    // Once the source recovers the same switch succeeds.
    source.repair();
    let report = session.switch_to_canvas(&broken).unwrap();
    assert_eq!(report.card_count, 1);
    assert!(session.cards.contains(5));
}

#[test]
fn test_drag_commit_cannot_leak_across_switch() {
    let (mut session, ids) = TestWorkspaceBuilder::new()
        .with_canvas("A", card_strip(1))
        .with_canvas("B", vec![text_card(1, (0.0, 0.0))])
        .build();
    session.switch_to_canvas(&ids[0]).unwrap();

    // Drag begins on A but the canvas switches mid-gesture.
    session.drag_at(50.0, 50.0);
    session.switch_to_canvas(&ids[1]).unwrap();

    // The gesture died with the switch; B's card 1 must not move.
    assert!(session.interaction.end_drag(&mut session.cards, (100.0, 100.0)).is_none());
    assert_eq!(session.cards.get(1).unwrap().position, (0.0, 0.0));
}
