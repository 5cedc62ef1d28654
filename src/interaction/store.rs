//! The canonical interaction-state store.
//!
//! One store exists per loaded canvas and owns selection, hover, the
//! drag/resize gesture, and the reference to the card under active edit. Every operation
//! is synchronous, total, and never panics: stale ids are silently ignored
//! (they routinely go stale under concurrent async refreshes), and invalid
//! requests are answered with "no state change" rather than errors.
//!
//! The store has no side effects beyond its own fields. Persistence is always
//! triggered by the caller observing a transition - most importantly the
//! [`DragCommit`] returned exactly once per gesture by [`end_drag`] - which
//! keeps the store purely synchronous and unit-testable without mocking I/O.
//!
//! [`end_drag`]: CardInteractionStore::end_drag

use std::collections::HashSet;

use tracing::debug;

use crate::constants::MIN_CARD_SIZE;
use crate::interaction::state::{DragState, Gesture, ResizeState};
use crate::types::CardId;
use crate::working_set::CardWorkingSet;

/// Interaction flags for a single card, read live by renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardFlags {
    pub selected: bool,
    pub hovered: bool,
    pub dragged: bool,
    pub editing: bool,
}

/// The observable outcome of a finished drag gesture.
///
/// Produced exactly once per gesture. The positions have already been applied
/// to the working set (optimistic apply); persisting them - and reconciling a
/// downstream failure - is the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub struct DragCommit {
    /// Final (card id, position) pairs for every card in the drag set
    pub moves: Vec<(CardId, (f32, f32))>,
}

/// The observable outcome of a finished resize gesture, produced exactly
/// once per gesture like [`DragCommit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeCommit {
    pub card_id: CardId,
    /// Final size, already clamped and applied to the working set
    pub size: (f32, f32),
}

/// Canonical state for selection, hover, drag/resize, and the active edit
/// reference, scoped to the currently loaded canvas.
#[derive(Default)]
pub struct CardInteractionStore {
    selected: HashSet<CardId>,
    hover: Option<CardId>,
    gesture: Gesture,
    /// The card under active edit. While set, selection mutations and drag
    /// starts are ignored so "selected" and "being edited" affordances can
    /// never show on the same canvas at once.
    editing: Option<CardId>,
}

impl CardInteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Selection ====================

    /// Select a card. With `additive` the card's membership is toggled
    /// (shift-click semantics); otherwise the selection is replaced.
    pub fn select_card(&mut self, cards: &CardWorkingSet, id: CardId, additive: bool) {
        if self.editing.is_some() {
            debug!(card_id = id, "select ignored: edit session active");
            return;
        }
        if !cards.contains(id) {
            debug!(card_id = id, "select ignored: stale card id");
            return;
        }

        if additive {
            if !self.selected.remove(&id) {
                self.selected.insert(id);
            }
        } else {
            self.selected.clear();
            self.selected.insert(id);
        }
    }

    /// Replace the selection with the given set. Stale ids are dropped.
    pub fn select_many(&mut self, cards: &CardWorkingSet, ids: &[CardId]) {
        if self.editing.is_some() {
            debug!("select_many ignored: edit session active");
            return;
        }
        self.selected = ids.iter().copied().filter(|&id| cards.contains(id)).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    // ==================== Drag ====================

    /// Begin a drag gesture at `origin` (canvas coordinates).
    ///
    /// Dragging a member of the existing multi-selection moves the whole
    /// selection; dragging an unselected card replaces the selection with
    /// that card. Locked, hidden, and stale ids never enter the drag set; if
    /// nothing draggable remains the call is a no-op.
    pub fn start_drag(&mut self, cards: &CardWorkingSet, ids: &[CardId], origin: (f32, f32)) {
        if self.editing.is_some() {
            debug!("start_drag ignored: edit session active");
            return;
        }

        let draggable = |id: &CardId| {
            cards
                .get(*id)
                .is_some_and(|card| !card.locked && !card.hidden)
        };

        let live: Vec<CardId> = ids.iter().copied().filter(|id| draggable(id)).collect();
        if live.is_empty() {
            debug!("start_drag ignored: no draggable cards in request");
            return;
        }

        let all_selected = live.iter().all(|id| self.selected.contains(id));
        let mut drag_set: Vec<CardId> = if all_selected {
            self.selected.iter().copied().filter(|id| draggable(id)).collect()
        } else {
            self.selected.clear();
            self.selected.extend(live.iter().copied());
            live
        };
        drag_set.sort_unstable();

        self.gesture = Gesture::Dragging(DragState {
            card_ids: drag_set,
            origin,
            offset: (0.0, 0.0),
        });
    }

    /// Update the live drag offset. O(1); fires every animation frame.
    pub fn update_drag(&mut self, offset: (f32, f32)) {
        self.gesture.set_offset(offset);
    }

    /// Finish the drag gesture, committing `final_offset` (displacement from
    /// the origin) into the working set.
    ///
    /// Always commits and always clears the drag state, regardless of what
    /// downstream persistence will say about it; reconciliation is the
    /// caller's job. Returns `None` when no drag was in progress, so the
    /// commit is observed at most once per gesture.
    pub fn end_drag(
        &mut self,
        cards: &mut CardWorkingSet,
        final_offset: (f32, f32),
    ) -> Option<DragCommit> {
        let state = self.gesture.take()?;
        let (dx, dy) = final_offset;

        let moves: Vec<(CardId, (f32, f32))> = state
            .card_ids
            .iter()
            .filter_map(|&id| {
                cards
                    .get(id)
                    .map(|card| (id, (card.position.0 + dx, card.position.1 + dy)))
            })
            .collect();

        cards.apply_moves(&moves);
        debug!(cards = moves.len(), dx, dy, "drag committed");
        Some(DragCommit { moves })
    }

    // ==================== Resize ====================

    /// Begin a resize gesture on one card (resize handles are per-card
    /// affordances). Locked, hidden, and stale ids are no-ops, as is a
    /// request while another gesture or an edit session is in progress.
    pub fn start_resize(&mut self, cards: &CardWorkingSet, id: CardId) {
        if self.editing.is_some() || !self.gesture.is_idle() {
            debug!(card_id = id, "start_resize ignored: busy");
            return;
        }
        let Some(card) = cards.get(id) else {
            debug!(card_id = id, "start_resize ignored: stale card id");
            return;
        };
        if card.locked || card.hidden {
            debug!(card_id = id, "start_resize ignored: card not resizable");
            return;
        }

        self.gesture = Gesture::Resizing(ResizeState {
            card_id: id,
            start_size: card.size,
            offset: (0.0, 0.0),
        });
    }

    /// Update the live resize offset. O(1); fires every animation frame.
    pub fn update_resize(&mut self, offset: (f32, f32)) {
        self.gesture.set_offset(offset);
    }

    /// Finish the resize gesture, committing the size implied by
    /// `final_offset` (handle displacement from gesture start) into the
    /// working set. Dimensions are clamped to `MIN_CARD_SIZE`; the commit
    /// is observed exactly once per gesture.
    pub fn end_resize(
        &mut self,
        cards: &mut CardWorkingSet,
        final_offset: (f32, f32),
    ) -> Option<ResizeCommit> {
        let state = self.gesture.take_resize()?;
        let size = (
            (state.start_size.0 + final_offset.0).max(MIN_CARD_SIZE),
            (state.start_size.1 + final_offset.1).max(MIN_CARD_SIZE),
        );

        cards.apply_resize(state.card_id, size);
        debug!(card_id = state.card_id, width = size.0, height = size.1, "resize committed");
        Some(ResizeCommit { card_id: state.card_id, size })
    }

    // ==================== Hover ====================

    /// Set or clear the hovered card. At most one card hovers at a time;
    /// the card under active edit is never a hover target.
    pub fn set_hover(&mut self, cards: &CardWorkingSet, id: Option<CardId>) {
        match id {
            None => self.hover = None,
            Some(id) => {
                if !cards.contains(id) {
                    debug!(card_id = id, "hover ignored: stale card id");
                    return;
                }
                if self.editing == Some(id) {
                    return;
                }
                self.hover = Some(id);
            }
        }
    }

    // ==================== Edit reference ====================

    /// Claim the edit reference for a card.
    ///
    /// Fails (returns false, no state change) while another edit reference
    /// is live, or when the card is locked or unknown. On success the
    /// selection is emptied, any in-progress drag is aborted, and hover on
    /// the card is dropped - a card cannot simultaneously show "selected"
    /// and "being edited" affordances.
    pub fn request_edit(&mut self, cards: &CardWorkingSet, id: CardId) -> bool {
        if let Some(current) = self.editing {
            debug!(card_id = id, editing = current, "edit denied: session active");
            return false;
        }
        let Some(card) = cards.get(id) else {
            debug!(card_id = id, "edit denied: stale card id");
            return false;
        };
        if card.locked {
            debug!(card_id = id, "edit denied: card locked");
            return false;
        }

        self.selected.clear();
        self.gesture.reset();
        if self.hover == Some(id) {
            self.hover = None;
        }
        self.editing = Some(id);
        true
    }

    /// Release the edit reference, re-enabling hover/selection/drag for the
    /// card. Tolerates being called with no reference live.
    pub fn end_edit(&mut self) {
        self.editing = None;
    }

    // ==================== Lifecycle hooks ====================

    /// Drop every reference to a removed card. Called transactionally with
    /// working-set removal; a dangling reference is a correctness violation.
    pub fn forget_card(&mut self, id: CardId) {
        self.selected.remove(&id);
        if self.hover == Some(id) {
            self.hover = None;
        }
        match &mut self.gesture {
            Gesture::Dragging(state) => {
                state.card_ids.retain(|&c| c != id);
                if state.card_ids.is_empty() {
                    self.gesture.reset();
                }
            }
            Gesture::Resizing(state) if state.card_id == id => self.gesture.reset(),
            _ => {}
        }
        if self.editing == Some(id) {
            self.editing = None;
        }
    }

    /// Clear everything. Canvas-switch step 2: interaction state is
    /// meaningless across canvas boundaries since ids are canvas-scoped.
    pub fn clear_all(&mut self) {
        self.selected.clear();
        self.hover = None;
        self.gesture.reset();
        self.editing = None;
    }

    // ==================== Queries ====================

    pub fn selection(&self) -> &HashSet<CardId> {
        &self.selected
    }

    pub fn is_selected(&self, id: CardId) -> bool {
        self.selected.contains(&id)
    }

    pub fn hovered(&self) -> Option<CardId> {
        self.hover
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.gesture.drag()
    }

    pub fn resize(&self) -> Option<&ResizeState> {
        self.gesture.resize()
    }

    /// Whether the card is part of the in-progress gesture (drag or resize).
    pub fn is_dragged(&self, id: CardId) -> bool {
        self.gesture.contains(id)
    }

    pub fn editing_card(&self) -> Option<CardId> {
        self.editing
    }

    pub fn is_editing(&self, id: CardId) -> bool {
        self.editing == Some(id)
    }

    /// All four interaction flags for one card, read live by renderers.
    pub fn flags(&self, id: CardId) -> CardFlags {
        CardFlags {
            selected: self.is_selected(id),
            hovered: self.hover == Some(id),
            dragged: self.is_dragged(id),
            editing: self.is_editing(id),
        }
    }
}
