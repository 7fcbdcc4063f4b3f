//! Immutable state snapshots for the view layer
//!
//! A snapshot is a plain value copied out of the game state; it never
//! aliases live state, so the view layer can hold it across frames while
//! the session keeps mutating.

use crate::core::Card;
use crate::game::state::{GameState, GameStatus};
use crate::game::tableau::SlotId;
use serde::{Deserialize, Serialize};

/// One pyramid slot as the view layer sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub card: Card,
    pub removed: bool,
    pub exposed: bool,
}

/// The full render-facing state: the 28-slot grid plus pile counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub slots: Vec<SlotView>,
    pub stock_len: usize,
    pub waste_top: Option<Card>,
    pub waste_len: usize,
    pub recycles_used: u32,
    pub recycle_limit: u32,
    pub status: GameStatus,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let slots = state
            .tableau
            .slots()
            .iter()
            .enumerate()
            .map(|(i, slot)| SlotView {
                card: slot.card,
                removed: slot.removed,
                exposed: state.tableau.is_exposed(SlotId::new(i as u8)),
            })
            .collect();
        Snapshot {
            slots,
            stock_len: state.piles.stock_len(),
            waste_top: state.piles.waste_top(),
            waste_len: state.piles.waste_len(),
            recycles_used: state.piles.recycles_used(),
            recycle_limit: state.piles.recycle_limit(),
            status: state.status,
        }
    }

    /// Ids of the exposed, still-live slots in this snapshot.
    pub fn exposed_ids(&self) -> Vec<SlotId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, v)| v.exposed)
            .map(|(i, _)| SlotId::new(i as u8))
            .collect()
    }
}
