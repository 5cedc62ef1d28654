//! Error types for the interaction core.
//!
//! Every failure surfaces as a return value; the core never panics on user
//! input and never renders UI. Stale-id references are not errors at all -
//! they resolve as silent no-ops inside the store.

use thiserror::Error;

/// Opaque failure from the external content CRUD layer.
///
/// The core makes no assumptions about the transport behind the
/// [`ContentSource`](crate::source::ContentSource) seam, so the underlying
/// error is carried as an `anyhow::Error`.
#[derive(Error, Debug)]
#[error("content source error: {0}")]
pub struct SourceError(#[from] pub anyhow::Error);

impl SourceError {
    pub fn msg(msg: impl Into<String>) -> Self {
        Self(anyhow::anyhow!(msg.into()))
    }
}

/// Errors from canvas switching and deletion.
#[derive(Error, Debug)]
pub enum SwitchError {
    /// Neither the requested canvas nor a workspace default exists; the
    /// caller should offer canvas creation rather than fail silently.
    #[error("canvas {0:?} not found and workspace has no default canvas")]
    CreationRequired(String),

    /// Loading the target canvas's cards or settings failed. The session is
    /// left cleared but pointed at the target canvas; retrying the switch is
    /// safe.
    #[error("failed to load canvas {canvas_id}")]
    Load {
        canvas_id: String,
        #[source]
        source: SourceError,
    },
}

/// Result type alias for source-backed operations.
pub type SourceResult<T> = Result<T, SourceError>;
