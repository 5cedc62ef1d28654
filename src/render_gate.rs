//! Per-card change detection for render suppression.
//!
//! Viewport pan and zoom rebuild every card's render frame every animation
//! frame; with thousands of cards, recomputing each card's visual subtree on
//! every rebuild is the difference between a smooth pan and a slideshow. The
//! gate decides, from two successive [`CardFrame`] snapshots, whether a
//! card's subtree must actually be recomputed - decoupling "the viewport
//! moved" from "this card changed".
//!
//! Interaction flags (selected/hovered/dragged/editing) are deliberately not
//! part of the frame: renderers read them live from the
//! [`CardInteractionStore`](crate::interaction::CardInteractionStore) so they
//! stay reactive without forcing the gate to report "changed". The verdict is
//! a performance hint only; renderers must render correctly even when invoked
//! unconditionally.

use std::sync::Arc;

use crate::types::Card;

/// Immutable per-render snapshot of one card, as handed to a card renderer.
#[derive(Clone, Debug)]
pub struct CardFrame {
    pub card: Card,
    /// Whether editing affordances are offered for this card (false for
    /// locked cards or read-only canvases)
    pub edit_enabled: bool,
    /// Generation of the drag-commit route this frame was built against.
    /// Bumped on canvas switch, never by viewport movement, so frames
    /// rebuilt during a pan compare equal. Stands in for the source
    /// system's drag-completion callback identity: here `end_drag` already
    /// yields its commit exactly once per gesture, so only a genuine route
    /// change forces a re-render.
    pub drag_epoch: u64,
}

/// Why the gate ordered a re-render. Ordered cheapest-check-first; the first
/// difference found wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderReason {
    Identity,
    Position,
    Size,
    Content,
    EditEnabled,
    DragRoute,
}

/// The first difference between two frames, or `None` when the card's visual
/// subtree can be reused as-is.
pub fn render_reason(prev: &CardFrame, next: &CardFrame) -> Option<RenderReason> {
    if prev.card.id != next.card.id {
        return Some(RenderReason::Identity);
    }
    if prev.card.position != next.card.position || prev.card.z != next.card.z {
        return Some(RenderReason::Position);
    }
    if prev.card.size != next.card.size {
        return Some(RenderReason::Size);
    }
    if content_changed(prev, next) {
        return Some(RenderReason::Content);
    }
    if prev.edit_enabled != next.edit_enabled {
        return Some(RenderReason::EditEnabled);
    }
    if prev.drag_epoch != next.drag_epoch {
        return Some(RenderReason::DragRoute);
    }
    None
}

/// Whether the card's visual subtree must be recomputed.
pub fn should_render(prev: &CardFrame, next: &CardFrame) -> bool {
    render_reason(prev, next).is_some()
}

/// Content comparison: pointer check first (snapshots of an unchanged card
/// share the same `Arc`), falling back to value comparison only on pointer
/// mismatch.
fn content_changed(prev: &CardFrame, next: &CardFrame) -> bool {
    if Arc::ptr_eq(&prev.card.content, &next.card.content) {
        return false;
    }
    prev.card.content != next.card.content
}
