//! Canvas metadata for a workspace.
//!
//! The index knows which canvases exist, their names and timestamps, and
//! which one is the workspace default. It owns the at-most-one-default
//! invariant; card data itself lives behind the
//! [`ContentSource`](crate::source::ContentSource) seam and is only loaded
//! for the active canvas.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Current unix timestamp in seconds.
fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Metadata for one canvas.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CanvasMeta {
    /// Canvas id (uuid v4)
    pub id: String,
    /// Owning workspace id
    pub workspace_id: String,
    pub name: String,
    /// At most one canvas per workspace carries this flag
    pub is_default: bool,
    pub created_at: u64,
    pub updated_at: u64,
}

impl CanvasMeta {
    pub fn new(workspace_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = now_secs();
        Self {
            id: Uuid::new_v4().to_string(),
            workspace_id: workspace_id.into(),
            name: name.into(),
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump the last-used timestamp.
    pub fn touch(&mut self) {
        self.updated_at = now_secs();
    }
}

/// All canvases of a workspace.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CanvasIndex {
    pub canvases: Vec<CanvasMeta>,
}

impl CanvasIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canvas in a workspace. The first canvas of a workspace
    /// becomes its default.
    pub fn create_canvas(
        &mut self,
        workspace_id: impl Into<String>,
        name: impl Into<String>,
    ) -> CanvasMeta {
        let mut meta = CanvasMeta::new(workspace_id, name);
        meta.is_default = !self
            .canvases
            .iter()
            .any(|c| c.workspace_id == meta.workspace_id);
        self.canvases.push(meta.clone());
        meta
    }

    pub fn get(&self, id: &str) -> Option<&CanvasMeta> {
        self.canvases.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut CanvasMeta> {
        self.canvases.iter_mut().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(meta) => {
                meta.name = name.into();
                meta.touch();
                true
            }
            None => false,
        }
    }

    /// Make a canvas its workspace's default, clearing the previous default.
    pub fn set_default(&mut self, id: &str) -> bool {
        let Some(workspace_id) = self.get(id).map(|c| c.workspace_id.clone()) else {
            return false;
        };
        for canvas in &mut self.canvases {
            if canvas.workspace_id == workspace_id {
                canvas.is_default = canvas.id == id;
            }
        }
        true
    }

    /// The workspace's default canvas, if one is designated. The switch
    /// coordinator tolerates the absence by falling back to the first
    /// remaining canvas.
    pub fn default_canvas(&self, workspace_id: &str) -> Option<&CanvasMeta> {
        self.canvases
            .iter()
            .find(|c| c.workspace_id == workspace_id && c.is_default)
    }

    /// The first canvas of a workspace in creation order.
    pub fn first_canvas(&self, workspace_id: &str) -> Option<&CanvasMeta> {
        self.canvases.iter().find(|c| c.workspace_id == workspace_id)
    }

    pub fn canvases_for(&self, workspace_id: &str) -> impl Iterator<Item = &CanvasMeta> {
        self.canvases
            .iter()
            .filter(move |c| c.workspace_id == workspace_id)
    }

    pub fn workspace_len(&self, workspace_id: &str) -> usize {
        self.canvases_for(workspace_id).count()
    }

    /// Remove a canvas. Removing the default leaves the workspace without
    /// one; callers that need a default re-designate explicitly.
    pub fn remove(&mut self, id: &str) -> Option<CanvasMeta> {
        let pos = self.canvases.iter().position(|c| c.id == id)?;
        Some(self.canvases.remove(pos))
    }
}
