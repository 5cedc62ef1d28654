//! Unit tests for the workspace-level edit entry points.
//!
//! The coordinator's own state machine is covered next to its source; these
//! tests drive editing the way the embedder does, through
//! `WorkspaceSession::begin_edit` / `cancel_edit` / `save_edit`.

use cardboard::edit::{EditPhase, SaveOutcome};
use cardboard::error::SourceError;
use cardboard::types::EditMode;

use crate::helpers::{card_strip, code_card, session_with_cards, text_card};

#[test]
fn test_at_most_one_session_workspace_wide() {
    let mut session = session_with_cards(card_strip(2));

    assert!(session.begin_edit(1));
    assert!(session.edit.is_active());
    assert_eq!(session.edit.editing_card(), Some(1));

    // Re-requesting the same card is idempotent.
    assert!(session.begin_edit(1));
    assert_eq!(session.edit.editing_card(), Some(1));
}

#[test]
fn test_activating_other_card_swaps_sessions() {
    let mut session =
        session_with_cards(vec![text_card(1, (0.0, 0.0)), code_card(2, (400.0, 0.0))]);

    assert!(session.begin_edit(1));
    session.edit.mark_dirty();

    // The dirty session on card 1 is discarded, never saved.
    assert!(session.begin_edit(2));
    assert_eq!(session.edit.editing_card(), Some(2));
    assert_eq!(session.edit.active_session().unwrap().mode, EditMode::Code);
    assert!(!session.edit.active_session().unwrap().dirty);
    assert!(session.interaction.is_editing(2));
    assert!(!session.interaction.is_editing(1));
}

#[test]
fn test_escape_discards() {
    let mut session = session_with_cards(card_strip(1));

    assert!(session.begin_edit(1));
    session.edit.mark_dirty();
    assert!(session.cancel_edit());

    assert_eq!(*session.edit.phase(), EditPhase::Idle);
    assert_eq!(session.interaction.editing_card(), None);
    // Nothing left to cancel.
    assert!(!session.cancel_edit());
}

#[test]
fn test_save_releases_session_and_store() {
    let mut session = session_with_cards(card_strip(1));

    assert!(session.begin_edit(1));
    let outcome = session.save_edit(|pending| {
        assert_eq!(pending.card_id, 1);
        assert_eq!(pending.mode, EditMode::Text);
        Ok(())
    });

    assert!(matches!(outcome, Some(SaveOutcome::Saved { card_id: 1 })));
    assert_eq!(*session.edit.phase(), EditPhase::Idle);
    assert_eq!(session.interaction.editing_card(), None);
}

#[test]
fn test_failed_save_surfaces_and_allows_retry() {
    let mut session = session_with_cards(card_strip(1));

    assert!(session.begin_edit(1));
    let outcome = session.save_edit(|_| Err(SourceError::msg("write rejected")));

    match outcome {
        Some(SaveOutcome::Failed { card_id, error }) => {
            assert_eq!(card_id, 1);
            assert!(error.to_string().contains("write rejected"));
        }
        other => panic!("expected failed save, got {:?}", other),
    }
    // No auto-revert: the machine is idle and the card is editable again.
    assert_eq!(*session.edit.phase(), EditPhase::Idle);
    assert!(session.begin_edit(1));
}

#[test]
fn test_save_with_no_session_is_a_noop() {
    let mut session = session_with_cards(card_strip(1));
    assert!(session.save_edit(|_| Ok(())).is_none());
}

#[test]
fn test_removing_edited_card_cancels() {
    let mut session = session_with_cards(card_strip(2));

    assert!(session.begin_edit(1));
    assert!(session.remove_card(1).is_some());

    assert_eq!(*session.edit.phase(), EditPhase::Idle);
    assert_eq!(session.interaction.editing_card(), None);
    // Editing some other card still works afterwards.
    assert!(session.begin_edit(2));
}

#[test]
fn test_selection_restored_semantics_after_session() {
    let mut session = session_with_cards(card_strip(2));

    session.interaction.select_many(&session.cards, &[1, 2]);
    assert!(session.begin_edit(1));
    assert!(session.interaction.selection().is_empty());

    assert!(session.cancel_edit());
    // Selection does not come back by itself; the embedder reselects.
    assert!(session.interaction.selection().is_empty());
    session.interaction.select_card(&session.cards, 1, false);
    assert!(session.interaction.is_selected(1));
}
