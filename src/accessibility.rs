//! Linear navigation order for keyboard and screen-reader consumers.
//!
//! The spatial card set has no inherent sequence, so assistive navigation
//! derives one: visible cards are banded into rows by vertical proximity,
//! rows run top to bottom, and cards within a row run left to right. The
//! projection is a pure read of the working set; focus changes go through
//! the ordinary [`CardInteractionStore`] selection entry points - there is
//! no privileged API.

use std::cmp::Ordering;

use crate::constants::READING_ROW_BAND;
use crate::interaction::CardInteractionStore;
use crate::types::{Card, CardId};
use crate::working_set::CardWorkingSet;

/// Row-major reading order over the visible cards. Deterministic: ties are
/// broken by card id.
pub fn reading_order(cards: &CardWorkingSet) -> Vec<CardId> {
    let mut visible: Vec<&Card> = cards.iter().filter(|c| !c.hidden).collect();
    visible.sort_by(|a, b| {
        a.position
            .1
            .partial_cmp(&b.position.1)
            .unwrap_or(Ordering::Equal)
            .then(a.id.cmp(&b.id))
    });

    // Greedy row banding: a card joins the current row while its top edge is
    // within READING_ROW_BAND of the row anchor.
    let mut order = Vec::with_capacity(visible.len());
    let mut row: Vec<&Card> = Vec::new();
    let mut anchor = f32::NEG_INFINITY;
    for card in visible {
        if card.position.1 > anchor + READING_ROW_BAND {
            flush_row(&mut row, &mut order);
            anchor = card.position.1;
        }
        row.push(card);
    }
    flush_row(&mut row, &mut order);
    order
}

fn flush_row(row: &mut Vec<&Card>, order: &mut Vec<CardId>) {
    row.sort_by(|a, b| {
        a.position
            .0
            .partial_cmp(&b.position.0)
            .unwrap_or(Ordering::Equal)
            .then(a.id.cmp(&b.id))
    });
    order.extend(row.drain(..).map(|c| c.id));
}

/// The card after `current` in reading order, wrapping at the end. With no
/// current card (or a stale one), the first card.
pub fn next_card(order: &[CardId], current: Option<CardId>) -> Option<CardId> {
    let pos = current.and_then(|id| order.iter().position(|&c| c == id));
    match pos {
        Some(pos) => order.get((pos + 1) % order.len()).copied(),
        None => order.first().copied(),
    }
}

/// The card before `current` in reading order, wrapping at the start. With
/// no current card (or a stale one), the last card.
pub fn prev_card(order: &[CardId], current: Option<CardId>) -> Option<CardId> {
    let pos = current.and_then(|id| order.iter().position(|&c| c == id));
    match pos {
        Some(0) | None => order.last().copied(),
        Some(pos) => order.get(pos - 1).copied(),
    }
}

/// Move keyboard focus to a card through the ordinary selection entry point.
pub fn focus_card(store: &mut CardInteractionStore, cards: &CardWorkingSet, id: CardId) {
    store.select_card(cards, id, false);
}
