//! The pyramid tableau: a 28-slot triangular dependency graph
//!
//! Slots live in a flat array indexed by `SlotId` (0-27, row-major over 7
//! rows) with the supporter relation computed from index arithmetic, rather
//! than a linked node tree. Exposure is a pure function of the removed flags
//! of the two slots below and is recomputed on every query, never cached.

use crate::core::{Card, PYRAMID_SIZE};
use crate::{PyramidError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Number of slots in the pyramid
pub const SLOT_COUNT: usize = PYRAMID_SIZE;

/// Number of rows; row `r` (0-indexed) holds `r + 1` slots
pub const ROW_COUNT: usize = 7;

/// First slot index of a row
fn row_start(row: usize) -> usize {
    row * (row + 1) / 2
}

/// Identifier of a pyramid slot, 0-27 row-major from the apex
///
/// Plain integer newtype; ids outside 0-27 are representable and rejected at
/// lookup, the same way dangling entity ids are handled elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(u8);

impl SlotId {
    pub fn new(id: u8) -> Self {
        SlotId(id)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// Row of this slot (0 = apex). Valid ids only.
    pub fn row(&self) -> usize {
        let mut row = 0;
        while row_start(row + 1) <= self.as_usize() {
            row += 1;
        }
        row
    }

    /// The two slots directly below that must both be removed before this
    /// slot is exposed. `None` for the bottom row.
    pub fn supporters(&self) -> Option<(SlotId, SlotId)> {
        let row = self.row();
        if row + 1 >= ROW_COUNT {
            return None;
        }
        let col = self.as_usize() - row_start(row);
        let left = row_start(row + 1) + col;
        Some((SlotId(left as u8), SlotId(left as u8 + 1)))
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single pyramid position: its dealt card and whether it has been removed
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Slot {
    pub card: Card,
    pub removed: bool,
}

/// The 28-slot pyramid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tableau {
    slots: Vec<Slot>,
}

impl Tableau {
    /// Lay out 28 dealt cards row-major from the apex.
    pub fn deal(cards: Vec<Card>) -> Self {
        assert_eq!(cards.len(), SLOT_COUNT, "pyramid deal must be 28 cards");
        Tableau {
            slots: cards
                .into_iter()
                .map(|card| Slot { card, removed: false })
                .collect(),
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id.as_usize())
    }

    /// The card still sitting at `id`, or `None` if removed or out of range.
    pub fn card_at(&self, id: SlotId) -> Option<Card> {
        self.get(id)
            .filter(|slot| !slot.removed)
            .map(|slot| slot.card)
    }

    /// A slot is exposed iff it still holds its card and both supporters are
    /// removed. Bottom-row slots have no supporters and are exposed until
    /// removed.
    pub fn is_exposed(&self, id: SlotId) -> bool {
        let Some(slot) = self.get(id) else {
            return false;
        };
        if slot.removed {
            return false;
        }
        match id.supporters() {
            None => true,
            Some((left, right)) => {
                self.slots[left.as_usize()].removed && self.slots[right.as_usize()].removed
            }
        }
    }

    /// All currently exposed slot ids, ascending. Recomputed from the removed
    /// flags on every call; callers must not assume caching.
    pub fn exposed_slots(&self) -> SmallVec<[SlotId; 8]> {
        (0..SLOT_COUNT as u8)
            .map(SlotId::new)
            .filter(|&id| self.is_exposed(id))
            .collect()
    }

    /// Mark an exposed slot removed and yield its card. Fails with
    /// `IllegalRemoval` (and mutates nothing) when the slot is blocked,
    /// already removed, or out of range.
    pub fn remove(&mut self, id: SlotId) -> Result<Card> {
        if !self.is_exposed(id) {
            return Err(PyramidError::IllegalRemoval(id.as_u8()));
        }
        let slot = &mut self.slots[id.as_usize()];
        slot.removed = true;
        Ok(slot.card)
    }

    /// All 28 slots removed: the win condition.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.removed)
    }

    pub fn removed_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.removed).count()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }
}
