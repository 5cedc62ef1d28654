//! Unit tests for render suppression at the session level.
//!
//! Frames are built through `WorkspaceSession::frame()` the way a renderer
//! would build them, so these tests exercise the real snapshot path rather
//! than hand-assembled frames.

use cardboard::render_gate::{render_reason, should_render, RenderReason};

use crate::helpers::{card_strip, locked_card, session_with_cards, text_card, TestWorkspaceBuilder};

#[test]
fn test_other_cards_interaction_does_not_force_render() {
    let mut session = session_with_cards(card_strip(3));
    let prev = session.frame(1).unwrap();

    // Select, hover, and drag everything except card 1.
    session.interaction.select_many(&session.cards, &[2, 3]);
    session.interaction.set_hover(&session.cards, Some(2));
    session.interaction.start_drag(&session.cards, &[2, 3], (0.0, 0.0));
    session.interaction.update_drag((5.0, 5.0));

    let next = session.frame(1).unwrap();
    assert!(!should_render(&prev, &next));
}

#[test]
fn test_own_selection_does_not_force_render() {
    // Selection is read live from the store, never baked into the frame.
    let mut session = session_with_cards(card_strip(1));
    let prev = session.frame(1).unwrap();

    session.interaction.select_card(&session.cards, 1, false);
    let next = session.frame(1).unwrap();
    assert!(!should_render(&prev, &next));
}

#[test]
fn test_committed_drag_forces_render_of_moved_card_only() {
    let mut session = session_with_cards(card_strip(2));
    let prev_moved = session.frame(1).unwrap();
    let prev_still = session.frame(2).unwrap();

    session.interaction.start_drag(&session.cards, &[1], (0.0, 0.0));
    session.interaction.end_drag(&mut session.cards, (30.0, 10.0)).unwrap();

    let next_moved = session.frame(1).unwrap();
    let next_still = session.frame(2).unwrap();
    assert_eq!(render_reason(&prev_moved, &next_moved), Some(RenderReason::Position));
    assert_eq!(render_reason(&prev_still, &next_still), None);
}

#[test]
fn test_committed_resize_forces_render() {
    let mut session = session_with_cards(card_strip(1));
    let prev = session.frame(1).unwrap();

    session.interaction.start_resize(&session.cards, 1);
    session.interaction.end_resize(&mut session.cards, (80.0, 40.0)).unwrap();

    let next = session.frame(1).unwrap();
    assert_eq!(render_reason(&prev, &next), Some(RenderReason::Size));
}

#[test]
fn test_content_replacement_forces_render() {
    let mut session = session_with_cards(card_strip(1));
    let prev = session.frame(1).unwrap();

    let mut edited = session.cards.get(1).unwrap().clone();
    edited.content = std::sync::Arc::new(cardboard::types::CardContent::Text {
        text: "rewritten".into(),
    });
    session.upsert_card(edited);

    let next = session.frame(1).unwrap();
    assert_eq!(render_reason(&prev, &next), Some(RenderReason::Content));
}

#[test]
fn test_locked_card_frame_disables_editing() {
    let session = session_with_cards(vec![text_card(1, (0.0, 0.0)), locked_card(2, (400.0, 0.0))]);

    assert!(session.frame(1).unwrap().edit_enabled);
    assert!(!session.frame(2).unwrap().edit_enabled);
}

#[test]
fn test_lock_toggle_forces_render() {
    let mut session = session_with_cards(card_strip(1));
    let prev = session.frame(1).unwrap();

    let mut locked = session.cards.get(1).unwrap().clone();
    locked.locked = true;
    session.upsert_card(locked);

    let next = session.frame(1).unwrap();
    assert_eq!(render_reason(&prev, &next), Some(RenderReason::EditEnabled));
}

#[test]
fn test_canvas_switch_bumps_drag_epoch() {
    let (mut session, ids) = TestWorkspaceBuilder::new()
        .with_canvas("A", vec![text_card(1, (0.0, 0.0))])
        .with_canvas("B", vec![text_card(1, (0.0, 0.0))])
        .build();

    session.switch_to_canvas(&ids[0]).unwrap();
    let on_a = session.frame(1).unwrap();

    session.switch_to_canvas(&ids[1]).unwrap();
    let on_b = session.frame(1).unwrap();

    // Same card id and geometry on both canvases, but the commit route is
    // per canvas.
    assert_eq!(render_reason(&on_a, &on_b), Some(RenderReason::DragRoute));

    // Frames rebuilt without an intervening switch compare equal.
    let on_b_again = session.frame(1).unwrap();
    assert!(!should_render(&on_b, &on_b_again));
}
