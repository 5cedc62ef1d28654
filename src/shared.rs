//! Single-writer ownership wrapper for multi-threaded embedders.
//!
//! The session itself assumes one coordination context: operations run to
//! completion before the next dispatches. Embedders whose UI toolkit
//! delivers callbacks from multiple threads wrap the session in a
//! [`SessionHandle`], which funnels every mutation through one
//! `parking_lot::RwLock` - the enumerated operations stay the only write
//! path, never ad hoc field writes.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::source::ContentSource;
use crate::workspace::WorkspaceSession;

/// Cloneable, thread-safe handle to a workspace session.
pub struct SessionHandle<S: ContentSource> {
    inner: Arc<RwLock<WorkspaceSession<S>>>,
}

impl<S: ContentSource> Clone for SessionHandle<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S: ContentSource> SessionHandle<S> {
    pub fn new(session: WorkspaceSession<S>) -> Self {
        Self { inner: Arc::new(RwLock::new(session)) }
    }

    /// Read access for renderers and projections.
    pub fn read<R>(&self, f: impl FnOnce(&WorkspaceSession<S>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Exclusive access for mutations; the closure runs to completion before
    /// any other caller observes the session.
    pub fn update<R>(&self, f: impl FnOnce(&mut WorkspaceSession<S>) -> R) -> R {
        f(&mut self.inner.write())
    }
}
