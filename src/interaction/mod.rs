//! Pointer-driven interaction state for the active canvas.
//!
//! ## Architecture
//!
//! A single explicit gesture state machine (`Gesture`) plus the canonical
//! [`CardInteractionStore`] replace scattered boolean flags and make
//! impossible states unrepresentable. All mutation funnels through the
//! store's enumerated operations; nothing else writes interaction state.
//!
//! ## Modules
//!
//! - `state` - drag gesture state machine
//! - `store` - the canonical selection/hover/drag/edit-reference store

mod state;
mod store;

pub use state::{DragState, Gesture, ResizeState};
pub use store::{CardFlags, CardInteractionStore, DragCommit, ResizeCommit};
