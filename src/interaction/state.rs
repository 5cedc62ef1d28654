//! Pointer gesture state machine.
//!
//! A single explicit state replaces scattered boolean flags, making
//! impossible states unrepresentable.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Dragging    (pointer down on a card, movement threshold crossed)
//! Idle -> Resizing    (pointer down on a resize handle)
//! Dragging -> Idle    (pointer up - final positions committed)
//! Resizing -> Idle    (pointer up - final size committed)
//! Any -> Idle         (edit session entry, card removal, canvas switch)
//! ```

use crate::types::CardId;

/// An in-progress drag gesture.
///
/// Exists only while the pointer is down. The live offset is the only field
/// written during pointer movement, keeping the per-frame update O(1); actual
/// card positions are written once, at gesture end.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// The ids being moved - the full selection, or a single card
    pub card_ids: Vec<CardId>,
    /// Pointer origin in canvas coordinates at gesture start
    pub origin: (f32, f32),
    /// Live displacement from the origin
    pub offset: (f32, f32),
}

/// An in-progress resize gesture. Always a single card; resize handles are
/// per-card affordances.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub card_id: CardId,
    /// Card size at gesture start
    pub start_size: (f32, f32),
    /// Live displacement of the dragged handle
    pub offset: (f32, f32),
}

/// Current pointer gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing(_))
    }

    /// The drag state, if a drag is in progress.
    pub fn drag(&self) -> Option<&DragState> {
        match self {
            Self::Dragging(state) => Some(state),
            _ => None,
        }
    }

    /// The resize state, if a resize is in progress.
    pub fn resize(&self) -> Option<&ResizeState> {
        match self {
            Self::Resizing(state) => Some(state),
            _ => None,
        }
    }

    /// Whether the given card is part of the current gesture.
    pub fn contains(&self, id: CardId) -> bool {
        match self {
            Self::Dragging(state) => state.card_ids.contains(&id),
            Self::Resizing(state) => state.card_id == id,
            Self::Idle => false,
        }
    }

    /// Update the live offset of whichever gesture is in progress.
    pub fn set_offset(&mut self, offset: (f32, f32)) {
        match self {
            Self::Dragging(state) => state.offset = offset,
            Self::Resizing(state) => state.offset = offset,
            Self::Idle => {}
        }
    }

    /// Reset to Idle, yielding the drag state that was in progress, if any.
    pub fn take(&mut self) -> Option<DragState> {
        match std::mem::take(self) {
            Self::Dragging(state) => Some(state),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Reset to Idle, yielding the resize state that was in progress, if any.
    pub fn take_resize(&mut self) -> Option<ResizeState> {
        match std::mem::take(self) {
            Self::Resizing(state) => Some(state),
            other => {
                *self = other;
                None
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
