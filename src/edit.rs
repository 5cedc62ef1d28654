//! The edit-session coordinator.
//!
//! Enforces at-most-one concurrent card edit workspace-wide and arbitrates
//! the transitions between editing, selection, and drag. The machine:
//!
//! ```text
//! Idle -> PendingEntry -> Active -> Saving     -> Idle   (explicit save)
//!                               \-> Cancelling -> Idle   (escape / activate
//!                                                         other / canvas switch)
//! ```
//!
//! `PendingEntry` and `Cancelling` resolve within the call that enters them;
//! the machine only ever rests in `Idle`, `Active`, or `Saving`, and is never
//! left in an ambiguous state. Serialized editor content never passes through
//! the coordinator: on save it hands the caller a [`PendingSave`] and the
//! caller dispatches persistence, reporting back through
//! [`complete_save`](EditSessionCoordinator::complete_save).

use tracing::{debug, warn};

use crate::error::SourceError;
use crate::interaction::CardInteractionStore;
use crate::types::{CardId, EditMode};
use crate::working_set::CardWorkingSet;

/// The mutually-exclusive state representing one card under active editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub card_id: CardId,
    /// Which editor flavor is mounted, derived from the card's content
    pub mode: EditMode,
    /// Whether the editor has reported unsaved changes
    pub dirty: bool,
}

/// Coordinator phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditPhase {
    #[default]
    Idle,
    /// Entry requested, invariants not yet checked (transient)
    PendingEntry { card_id: CardId, mode: EditMode },
    Active(EditSession),
    /// Persistence dispatched; not cancellable by this layer
    Saving(EditSession),
    /// Discarding pending edits (transient); persistence is never invoked
    Cancelling { card_id: CardId },
}

/// What triggered a cancellation, for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Escape,
    ActivatedOtherCard,
    CanvasSwitch,
    CardRemoved,
}

/// Handed to the caller when a save is dispatched: serialize the editor's
/// content for this card and persist it through the CRUD layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSave {
    pub card_id: CardId,
    pub mode: EditMode,
}

/// Terminal report of a save. On failure the machine has already dropped to
/// `Idle` - the draft is not retained here; the caller owns retry vs.
/// discard and keeps its own copy of the content it tried to persist.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved { card_id: CardId },
    Failed { card_id: CardId, error: SourceError },
}

/// Enforces the single-edit-session invariant and clean save/cancel
/// hand-off. Drives the store's edit reference; never touches card content.
#[derive(Default)]
pub struct EditSessionCoordinator {
    phase: EditPhase,
}

impl EditSessionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an edit session for a card.
    ///
    /// Rejected (returns false, machine stays `Idle`, store untouched) when
    /// a session is already `Active` or `Saving`, or when the card is locked
    /// or unknown. On success the store has cleared selection, aborted any
    /// drag, and suppressed hover on the card.
    pub fn request_edit(
        &mut self,
        store: &mut CardInteractionStore,
        cards: &CardWorkingSet,
        id: CardId,
    ) -> bool {
        if !matches!(self.phase, EditPhase::Idle) {
            debug!(card_id = id, phase = ?self.phase, "edit request denied: not idle");
            return false;
        }
        let Some(card) = cards.get(id) else {
            debug!(card_id = id, "edit request denied: stale card id");
            return false;
        };
        let mode = card.edit_mode();

        self.phase = EditPhase::PendingEntry { card_id: id, mode };
        if store.request_edit(cards, id) {
            debug!(card_id = id, mode = mode.label(), "edit session active");
            self.phase = EditPhase::Active(EditSession {
                card_id: id,
                mode,
                dirty: false,
            });
            true
        } else {
            self.phase = EditPhase::Idle;
            false
        }
    }

    /// Editor callback: the document has unsaved changes.
    pub fn mark_dirty(&mut self) {
        if let EditPhase::Active(session) = &mut self.phase {
            session.dirty = true;
        }
    }

    /// Dispatch a save: `Active -> Saving`. Returns the payload descriptor
    /// the caller uses to serialize and persist the editor content, or
    /// `None` when no session is active.
    pub fn begin_save(&mut self) -> Option<PendingSave> {
        let EditPhase::Active(session) = &self.phase else {
            debug!(phase = ?self.phase, "begin_save ignored: no active session");
            return None;
        };
        let pending = PendingSave {
            card_id: session.card_id,
            mode: session.mode,
        };
        self.phase = EditPhase::Saving(session.clone());
        Some(pending)
    }

    /// Report the persistence result for a dispatched save: `Saving -> Idle`
    /// on both paths.
    ///
    /// A rejected save does not revert to `Active`; the failure is surfaced
    /// in the outcome and the caller decides retry vs. discard. Tolerates
    /// the store reference having been cleared by a canvas switch while the
    /// save was in flight.
    pub fn complete_save(
        &mut self,
        store: &mut CardInteractionStore,
        result: Result<(), SourceError>,
    ) -> Option<SaveOutcome> {
        let session = match std::mem::take(&mut self.phase) {
            EditPhase::Saving(session) => session,
            other => {
                self.phase = other;
                warn!(phase = ?self.phase, "complete_save with no save in flight");
                return None;
            }
        };
        store.end_edit();
        Some(match result {
            Ok(()) => SaveOutcome::Saved { card_id: session.card_id },
            Err(error) => {
                warn!(card_id = session.card_id, %error, "save failed; session dropped to idle");
                SaveOutcome::Failed { card_id: session.card_id, error }
            }
        })
    }

    /// Synchronous convenience composing `begin_save`, the caller's persist
    /// callback, and `complete_save`.
    pub fn save_with<F>(
        &mut self,
        store: &mut CardInteractionStore,
        persist: F,
    ) -> Option<SaveOutcome>
    where
        F: FnOnce(&PendingSave) -> Result<(), SourceError>,
    {
        let pending = self.begin_save()?;
        let result = persist(&pending);
        self.complete_save(store, result)
    }

    /// Discard the session: `Active -> Cancelling -> Idle`. Pending edits are
    /// dropped and the persistence path is never invoked. Returns false when
    /// nothing was cancellable - in particular a save already `Saving` is
    /// not cancellable by this layer.
    pub fn cancel(&mut self, store: &mut CardInteractionStore, reason: CancelReason) -> bool {
        match std::mem::take(&mut self.phase) {
            EditPhase::Active(session) => {
                debug!(card_id = session.card_id, ?reason, dirty = session.dirty, "edit cancelled");
                self.phase = EditPhase::Cancelling { card_id: session.card_id };
                store.end_edit();
                self.phase = EditPhase::Idle;
                true
            }
            EditPhase::PendingEntry { card_id, .. } | EditPhase::Cancelling { card_id } => {
                store.end_edit();
                debug!(card_id, ?reason, "pending edit cancelled");
                self.phase = EditPhase::Idle;
                true
            }
            EditPhase::Saving(session) => {
                debug!(card_id = session.card_id, "cancel ignored: save in flight");
                self.phase = EditPhase::Saving(session);
                false
            }
            EditPhase::Idle => false,
        }
    }

    // ==================== Queries ====================

    pub fn phase(&self) -> &EditPhase {
        &self.phase
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, EditPhase::Active(_))
    }

    pub fn is_saving(&self) -> bool {
        matches!(self.phase, EditPhase::Saving(_))
    }

    pub fn active_session(&self) -> Option<&EditSession> {
        match &self.phase {
            EditPhase::Active(session) => Some(session),
            _ => None,
        }
    }

    /// The card under edit, whether `Active` or `Saving`.
    pub fn editing_card(&self) -> Option<CardId> {
        match &self.phase {
            EditPhase::Active(session) | EditPhase::Saving(session) => Some(session.card_id),
            _ => None,
        }
    }
}
