//! The workspace session: active canvas, working set, and the canvas-switch
//! coordinator.
//!
//! One session exists per open workspace. It owns the card working set and
//! the interaction/edit state for the active canvas, and it is the only
//! component allowed to swap that state wholesale. Switching canvases runs a
//! strict sequence - cancel edit, clear interaction state, clear the working
//! set, activate the target, load - so no observer ever sees one canvas's
//! card ids rendered against another canvas's viewport settings.

use tracing::{debug, info};

use crate::canvas_index::{CanvasIndex, CanvasMeta};
use crate::edit::{CancelReason, EditSessionCoordinator, SaveOutcome};
use crate::error::{SourceError, SwitchError};
use crate::interaction::CardInteractionStore;
use crate::render_gate::CardFrame;
use crate::source::ContentSource;
use crate::types::{Card, CardId, CanvasSettings};
use crate::working_set::CardWorkingSet;

/// Result of a completed canvas switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchReport {
    /// The canvas that is now active
    pub canvas_id: String,
    /// True when the requested canvas was absent and a fallback was used
    pub fallback_used: bool,
    pub card_count: usize,
}

/// Result of a canvas deletion.
#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted {
        removed: CanvasMeta,
        /// Set when the deleted canvas was active and the session switched
        /// to a successor first
        switched_to: Option<String>,
    },
    /// Deleting the sole remaining canvas of a workspace is a no-op
    RejectedSoleCanvas,
    /// Unknown canvas id; nothing changed
    NotFound,
}

/// Per-workspace coordination context.
///
/// All mutation runs to completion on the caller's single coordination
/// context; wrap in [`SessionHandle`](crate::shared::SessionHandle) when
/// multiple callback threads are unavoidable.
pub struct WorkspaceSession<S: ContentSource> {
    workspace_id: String,
    source: S,
    /// Canvas metadata for this workspace
    pub index: CanvasIndex,
    active_canvas: Option<String>,
    /// Cards of the active canvas
    pub cards: CardWorkingSet,
    /// Viewport settings of the active canvas
    pub viewport: CanvasSettings,
    pub interaction: CardInteractionStore,
    pub edit: EditSessionCoordinator,
    /// Bumped per canvas switch; see [`CardFrame::drag_epoch`]
    drag_epoch: u64,
}

impl<S: ContentSource> WorkspaceSession<S> {
    pub fn new(workspace_id: impl Into<String>, source: S, index: CanvasIndex) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            source,
            index,
            active_canvas: None,
            cards: CardWorkingSet::new(),
            viewport: CanvasSettings::default(),
            interaction: CardInteractionStore::new(),
            edit: EditSessionCoordinator::new(),
            drag_epoch: 0,
        }
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    pub fn active_canvas(&self) -> Option<&str> {
        self.active_canvas.as_deref()
    }

    pub fn drag_epoch(&self) -> u64 {
        self.drag_epoch
    }

    // ==================== Canvas switching ====================

    /// Switch the session to another canvas.
    ///
    /// When the requested canvas does not exist in this workspace, falls
    /// back to the workspace's default canvas; when no default exists
    /// either, returns
    /// [`SwitchError::CreationRequired`] so the caller can offer canvas
    /// creation. A load failure leaves the session cleared but pointed at
    /// the target; retrying the switch is safe.
    pub fn switch_to_canvas(&mut self, canvas_id: &str) -> Result<SwitchReport, SwitchError> {
        // Same ownership guard as delete: a canvas from another workspace is
        // as unreachable as one that does not exist.
        let known = self
            .index
            .get(canvas_id)
            .is_some_and(|meta| meta.workspace_id == self.workspace_id);
        let (target, fallback_used) = if known {
            (canvas_id.to_string(), false)
        } else {
            debug!(canvas_id, "switch target missing, trying workspace default");
            match self.index.default_canvas(&self.workspace_id) {
                Some(meta) => (meta.id.clone(), true),
                None => return Err(SwitchError::CreationRequired(canvas_id.to_string())),
            }
        };
        self.load_canvas(target, fallback_used)
    }

    /// The switch sequence proper. Steps run strictly in order; in
    /// particular the working set is emptied before any new canvas data
    /// becomes visible.
    fn load_canvas(
        &mut self,
        target: String,
        fallback_used: bool,
    ) -> Result<SwitchReport, SwitchError> {
        // 1. Force-cancel an open edit session; no implicit auto-save. A
        //    save already in flight is not cancellable and is detached: it
        //    completes later against the CRUD layer by card id.
        self.edit
            .cancel(&mut self.interaction, CancelReason::CanvasSwitch);

        // 2. Selection, drag, and hover are meaningless across canvas
        //    boundaries since card ids are canvas-scoped.
        self.interaction.clear_all();

        // 3. Must complete before step 5 begins.
        self.cards.clear();

        // 4.
        self.active_canvas = Some(target.clone());

        // 5. Load the new working set and persisted viewport.
        let cards = self
            .source
            .load_cards(&target)
            .map_err(|source| SwitchError::Load { canvas_id: target.clone(), source })?;
        let settings = self
            .source
            .load_settings(&target)
            .map_err(|source| SwitchError::Load { canvas_id: target.clone(), source })?;

        self.cards = CardWorkingSet::from_cards(cards);
        self.viewport = settings;
        self.drag_epoch += 1;
        if let Some(meta) = self.index.get_mut(&target) {
            meta.touch();
        }

        info!(canvas_id = %target, cards = self.cards.len(), fallback_used, "canvas switched");
        Ok(SwitchReport {
            canvas_id: target,
            fallback_used,
            card_count: self.cards.len(),
        })
    }

    /// Create a canvas in this workspace. The first canvas created becomes
    /// the workspace default.
    pub fn create_canvas(&mut self, name: impl Into<String>) -> CanvasMeta {
        self.index.create_canvas(self.workspace_id.clone(), name)
    }

    /// Delete a canvas.
    ///
    /// Deleting the active canvas runs the full switch sequence first,
    /// targeting the workspace default or, when the default is absent or is
    /// the canvas being deleted, the first remaining canvas - only then is
    /// the canvas's metadata discarded. Deleting the sole remaining canvas
    /// is a no-op. A failed successor load aborts the deletion.
    pub fn delete_canvas(&mut self, canvas_id: &str) -> Result<DeleteOutcome, SwitchError> {
        let known = self
            .index
            .get(canvas_id)
            .is_some_and(|meta| meta.workspace_id == self.workspace_id);
        if !known {
            debug!(canvas_id, "delete ignored: unknown canvas");
            return Ok(DeleteOutcome::NotFound);
        }
        if self.index.workspace_len(&self.workspace_id) <= 1 {
            debug!(canvas_id, "delete rejected: sole remaining canvas");
            return Ok(DeleteOutcome::RejectedSoleCanvas);
        }

        let mut switched_to = None;
        if self.active_canvas.as_deref() == Some(canvas_id) {
            let successor = self
                .index
                .default_canvas(&self.workspace_id)
                .filter(|meta| meta.id != canvas_id)
                .map(|meta| meta.id.clone())
                .or_else(|| {
                    self.index
                        .canvases_for(&self.workspace_id)
                        .find(|meta| meta.id != canvas_id)
                        .map(|meta| meta.id.clone())
                });
            // workspace_len > 1 guarantees a successor in this workspace
            if let Some(successor) = successor {
                let report = self.load_canvas(successor, true)?;
                switched_to = Some(report.canvas_id);
            }
        }

        match self.index.remove(canvas_id) {
            Some(removed) => {
                info!(canvas_id, ?switched_to, "canvas deleted");
                Ok(DeleteOutcome::Deleted { removed, switched_to })
            }
            None => Ok(DeleteOutcome::NotFound),
        }
    }

    // ==================== Card lifecycle ====================

    /// Insert or replace a card snapshot pushed by the CRUD layer.
    pub fn upsert_card(&mut self, card: Card) {
        self.cards.upsert(card);
    }

    /// Remove a card, transactionally clearing every interaction-state
    /// reference to it.
    pub fn remove_card(&mut self, id: CardId) -> Option<Card> {
        if self.edit.editing_card() == Some(id) {
            self.edit
                .cancel(&mut self.interaction, CancelReason::CardRemoved);
        }
        self.interaction.forget_card(id);
        self.cards.remove(id)
    }

    // ==================== Pointer entry points ====================

    /// Hit-test a pointer position and update hover accordingly.
    pub fn hover_at(&mut self, x: f32, y: f32) {
        let hit = self.cards.card_at_point(x, y);
        self.interaction.set_hover(&self.cards, hit);
    }

    /// Hit-test a click and update the selection. A miss on empty canvas
    /// clears the selection unless additive.
    pub fn select_at(&mut self, x: f32, y: f32, additive: bool) {
        match self.cards.card_at_point(x, y) {
            Some(id) => self.interaction.select_card(&self.cards, id, additive),
            None if !additive => self.interaction.clear_selection(),
            None => {}
        }
    }

    /// Marquee selection: select every visible card intersecting the region.
    pub fn select_in_rect(&mut self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) {
        let hits = self.cards.cards_in_rect(min_x, min_y, max_x, max_y);
        self.interaction.select_many(&self.cards, &hits);
    }

    /// Begin a drag on the card under the pointer.
    pub fn drag_at(&mut self, x: f32, y: f32) {
        if let Some(id) = self.cards.card_at_point(x, y) {
            self.interaction.start_drag(&self.cards, &[id], (x, y));
        }
    }

    // ==================== Edit entry points ====================

    /// Activate editing on a card. Activating a different card while a
    /// session is open cancels the open session first (discard, never
    /// auto-save). Returns whether the session was granted.
    pub fn begin_edit(&mut self, id: CardId) -> bool {
        if self.edit.editing_card() == Some(id) {
            return self.edit.is_active();
        }
        if self.edit.is_active() {
            self.edit
                .cancel(&mut self.interaction, CancelReason::ActivatedOtherCard);
        }
        self.edit.request_edit(&mut self.interaction, &self.cards, id)
    }

    /// Escape pressed: discard the open session.
    pub fn cancel_edit(&mut self) -> bool {
        self.edit.cancel(&mut self.interaction, CancelReason::Escape)
    }

    /// Save the open session synchronously through the given persist
    /// callback.
    pub fn save_edit<F>(&mut self, persist: F) -> Option<SaveOutcome>
    where
        F: FnOnce(&crate::edit::PendingSave) -> Result<(), SourceError>,
    {
        self.edit.save_with(&mut self.interaction, persist)
    }

    // ==================== Render frames ====================

    /// Build the per-render snapshot for one card.
    pub fn frame(&self, id: CardId) -> Option<CardFrame> {
        let card = self.cards.get(id)?;
        Some(CardFrame {
            card: card.clone(),
            edit_enabled: !card.locked,
            drag_epoch: self.drag_epoch,
        })
    }
}
