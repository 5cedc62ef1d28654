//! Cardboard - the interaction-state and coordination engine for a
//! multi-canvas card workspace.
//!
//! Users place and manipulate positionable cards (text/image/link/code
//! blocks) on pannable, zoomable canvases. This crate is the part with real
//! invariants: it mediates hover/selection/drag/edit across potentially
//! thousands of cards, suppresses redundant visual recomputation under
//! high-frequency pointer and viewport events, and switches the active
//! canvas with strict ordering so per-canvas interaction state never leaks
//! across canvas boundaries.
//!
//! Rendering, rich-text editing, and persistence transport are external
//! collaborators: renderers read interaction flags live from the store,
//! editors talk to the [`edit::EditSessionCoordinator`], and the CRUD layer
//! sits behind [`source::ContentSource`].
//!
//! ## Module map
//!
//! - [`types`] - cards, content variants, viewport settings
//! - [`working_set`] - the active canvas's card snapshots + spatial index
//! - [`interaction`] - the canonical selection/hover/drag/edit-ref store
//! - [`render_gate`] - per-card change detection for render suppression
//! - [`edit`] - the at-most-one edit-session state machine
//! - [`workspace`] - the session and canvas-switch coordinator
//! - [`canvas_index`] - per-workspace canvas metadata and the default flag
//! - [`accessibility`] - linear reading order for keyboard/screen readers
//! - [`shared`] - mutex-guarded handle for multi-threaded embedders

pub mod accessibility;
pub mod canvas_index;
pub mod constants;
pub mod edit;
pub mod error;
pub mod interaction;
pub mod perf;
pub mod render_gate;
pub mod shared;
pub mod source;
pub mod spatial_index;
pub mod types;
pub mod working_set;
pub mod workspace;

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static LOGGING: OnceCell<()> = OnceCell::new();

/// Initialize tracing output for embedders and tests.
///
/// Respects `RUST_LOG`; defaults to `warn` for dependencies and `info` for
/// this crate. Safe to call repeatedly - only the first call installs the
/// subscriber.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,cardboard=info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}
