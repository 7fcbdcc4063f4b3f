//! Match legality and execution, plus terminal-state evaluation
//!
//! All validation happens before any mutation: a failed proposal leaves the
//! tableau and piles exactly as they were. The loss check is a full scan of
//! every exposed card plus the waste top, never a heuristic, so the engine
//! can never declare a loss while a legal match remains.

use crate::core::Card;
use crate::game::state::GameStatus;
use crate::game::stock::StockWaste;
use crate::game::tableau::{SlotId, Tableau};
use crate::{PyramidError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Where a proposed card comes from: a pyramid slot or the waste top.
///
/// The undrawn stock top is deliberately not a source; a stock card becomes
/// matchable only after being drawn to the waste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    Pyramid(SlotId),
    Waste,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Pyramid(id) => write!(f, "slot {id}"),
            Source::Waste => write!(f, "waste"),
        }
    }
}

/// Resolve a source to its card without mutating anything.
///
/// Out-of-range slot ids and an empty waste report `EmptySource`; a blocked
/// or already-removed slot reports `IllegalRemoval`.
fn resolve(tableau: &Tableau, piles: &StockWaste, source: Source) -> Result<Card> {
    match source {
        Source::Pyramid(id) => {
            let slot = tableau.get(id).ok_or(PyramidError::EmptySource)?;
            if slot.removed || !tableau.is_exposed(id) {
                return Err(PyramidError::IllegalRemoval(id.as_u8()));
            }
            Ok(slot.card)
        }
        Source::Waste => piles.waste_top().ok_or(PyramidError::EmptySource),
    }
}

/// Perform a validated removal. Cannot fail after `resolve` succeeded.
fn commit(tableau: &mut Tableau, piles: &mut StockWaste, source: Source) -> Result<Card> {
    match source {
        Source::Pyramid(id) => tableau.remove(id),
        Source::Waste => piles.take_waste_top(),
    }
}

/// Remove a lone exposed King.
pub fn remove_single(
    tableau: &mut Tableau,
    piles: &mut StockWaste,
    source: Source,
) -> Result<Card> {
    let card = resolve(tableau, piles, source)?;
    if !card.is_king() {
        return Err(PyramidError::RankMismatch);
    }
    commit(tableau, piles, source)
}

/// Remove two exposed cards whose ranks sum to 13.
pub fn remove_pair(
    tableau: &mut Tableau,
    piles: &mut StockWaste,
    a: Source,
    b: Source,
) -> Result<(Card, Card)> {
    if a == b {
        return Err(PyramidError::SameSource);
    }
    let card_a = resolve(tableau, piles, a)?;
    let card_b = resolve(tableau, piles, b)?;
    if !card_a.pairs_with(&card_b) {
        return Err(PyramidError::RankMismatch);
    }
    // Both sources validated; removing one cannot un-expose the other.
    let card_a = commit(tableau, piles, a)?;
    let card_b = commit(tableau, piles, b)?;
    Ok((card_a, card_b))
}

/// Every currently legal match proposal: `(source, None)` for a lone King,
/// `(a, Some(b))` for an unordered 13-pair. Drives both the loss scan and
/// move enumeration for controllers.
pub fn legal_matches(
    tableau: &Tableau,
    piles: &StockWaste,
) -> SmallVec<[(Source, Option<Source>); 16]> {
    let mut sources: SmallVec<[(Source, Card); 8]> = tableau
        .exposed_slots()
        .into_iter()
        .filter_map(|id| tableau.card_at(id).map(|card| (Source::Pyramid(id), card)))
        .collect();
    if let Some(card) = piles.waste_top() {
        sources.push((Source::Waste, card));
    }

    let mut matches = SmallVec::new();
    for (i, &(src_a, card_a)) in sources.iter().enumerate() {
        if card_a.is_king() {
            matches.push((src_a, None));
            continue;
        }
        for &(src_b, card_b) in &sources[i + 1..] {
            if card_a.pairs_with(&card_b) {
                matches.push((src_a, Some(src_b)));
            }
        }
    }
    matches
}

/// Re-derive the status tag from the current position.
///
/// Won as soon as the tableau is empty, whatever the piles hold. Lost only
/// when no draw, no useful recycle, and no legal match remains. A pending
/// recycle counts as an out only while the waste is non-empty; recycling an
/// empty waste would move nothing.
pub fn evaluate_status(tableau: &Tableau, piles: &StockWaste) -> GameStatus {
    if tableau.is_empty() {
        return GameStatus::Won;
    }
    if piles.stock_len() > 0 || piles.can_recycle() {
        return GameStatus::InProgress;
    }
    if legal_matches(tableau, piles).is_empty() {
        GameStatus::Lost
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Deck, Rank, Suit};
    use crate::game::tableau::SLOT_COUNT;

    fn deal(seed: u64, recycle_limit: u32) -> (Tableau, StockWaste) {
        let (pyramid, stock) = Deck::shuffled(seed).deal();
        (Tableau::deal(pyramid), StockWaste::new(stock, recycle_limit))
    }

    /// Build a position directly from rank lists (suits cycled to keep the
    /// 52-card identity invariant out of the way of these unit tests).
    fn position(pyramid_ranks: [Rank; 28], stock_ranks: &[Rank]) -> (Tableau, StockWaste) {
        let suits = Suit::ALL;
        let pyramid = pyramid_ranks
            .iter()
            .enumerate()
            .map(|(i, &r)| Card::new(r, suits[i % 4]))
            .collect();
        let stock = stock_ranks
            .iter()
            .enumerate()
            .map(|(i, &r)| Card::new(r, suits[i % 4]))
            .collect();
        (Tableau::deal(pyramid), StockWaste::new(stock, 0))
    }

    #[test]
    fn test_blocked_slot_rejected_before_mutation() {
        let (mut tableau, mut piles) = deal(42, 2);
        let removed_before = tableau.removed_count();
        let waste_before = piles.waste_len();

        let err = remove_pair(
            &mut tableau,
            &mut piles,
            Source::Pyramid(SlotId::new(0)),
            Source::Pyramid(SlotId::new(21)),
        )
        .unwrap_err();

        assert_eq!(err, PyramidError::IllegalRemoval(0));
        assert_eq!(tableau.removed_count(), removed_before);
        assert_eq!(piles.waste_len(), waste_before);
    }

    #[test]
    fn test_same_source_rejected() {
        let (mut tableau, mut piles) = deal(42, 2);
        let err = remove_pair(
            &mut tableau,
            &mut piles,
            Source::Pyramid(SlotId::new(21)),
            Source::Pyramid(SlotId::new(21)),
        )
        .unwrap_err();
        assert_eq!(err, PyramidError::SameSource);

        piles.draw().unwrap();
        let err = remove_pair(&mut tableau, &mut piles, Source::Waste, Source::Waste).unwrap_err();
        assert_eq!(err, PyramidError::SameSource);
    }

    #[test]
    fn test_empty_waste_and_bad_slot_are_empty_source() {
        let (mut tableau, mut piles) = deal(42, 2);
        assert_eq!(
            remove_single(&mut tableau, &mut piles, Source::Waste).unwrap_err(),
            PyramidError::EmptySource
        );
        assert_eq!(
            remove_single(&mut tableau, &mut piles, Source::Pyramid(SlotId::new(99))).unwrap_err(),
            PyramidError::EmptySource
        );
    }

    #[test]
    fn test_pair_must_sum_to_13() {
        // Bottom row: 6 and 7 pair up, 6 and 6 do not.
        let mut ranks = [Rank::Two; 28];
        ranks[21] = Rank::Six;
        ranks[22] = Rank::Six;
        ranks[23] = Rank::Seven;
        let (mut tableau, mut piles) = position(ranks, &[]);

        let err = remove_pair(
            &mut tableau,
            &mut piles,
            Source::Pyramid(SlotId::new(21)),
            Source::Pyramid(SlotId::new(22)),
        )
        .unwrap_err();
        assert_eq!(err, PyramidError::RankMismatch);
        assert_eq!(tableau.removed_count(), 0);

        let (a, b) = remove_pair(
            &mut tableau,
            &mut piles,
            Source::Pyramid(SlotId::new(21)),
            Source::Pyramid(SlotId::new(23)),
        )
        .unwrap();
        assert_eq!(a.value() + b.value(), 13);
        assert_eq!(tableau.removed_count(), 2);
    }

    #[test]
    fn test_kings_remove_alone_and_never_pair() {
        let mut ranks = [Rank::Two; 28];
        ranks[21] = Rank::King;
        ranks[22] = Rank::Ace;
        let (mut tableau, mut piles) = position(ranks, &[]);

        // King + anything is not a pair.
        let err = remove_pair(
            &mut tableau,
            &mut piles,
            Source::Pyramid(SlotId::new(21)),
            Source::Pyramid(SlotId::new(22)),
        )
        .unwrap_err();
        assert_eq!(err, PyramidError::RankMismatch);

        // Non-king is not a single.
        let err =
            remove_single(&mut tableau, &mut piles, Source::Pyramid(SlotId::new(22))).unwrap_err();
        assert_eq!(err, PyramidError::RankMismatch);

        let card = remove_single(&mut tableau, &mut piles, Source::Pyramid(SlotId::new(21))).unwrap();
        assert!(card.is_king());
    }

    #[test]
    fn test_waste_top_pairs_with_pyramid_slot() {
        let mut ranks = [Rank::Two; 28];
        ranks[21] = Rank::Nine;
        let (mut tableau, mut piles) = position(ranks, &[Rank::Four]);
        piles.draw().unwrap();

        let (a, b) = remove_pair(
            &mut tableau,
            &mut piles,
            Source::Waste,
            Source::Pyramid(SlotId::new(21)),
        )
        .unwrap();
        assert_eq!(a.value() + b.value(), 13);
        assert_eq!(piles.waste_len(), 0);
        assert_eq!(tableau.removed_count(), 1);
    }

    #[test]
    fn test_legal_matches_enumerates_kings_and_pairs() {
        let mut ranks = [Rank::Two; 28];
        ranks[21] = Rank::King;
        ranks[22] = Rank::Six;
        ranks[23] = Rank::Seven;
        ranks[24] = Rank::Six;
        let (tableau, piles) = position(ranks, &[]);

        let matches = legal_matches(&tableau, &piles);
        let kings = matches.iter().filter(|(_, b)| b.is_none()).count();
        let pairs = matches.iter().filter(|(_, b)| b.is_some()).count();
        assert_eq!(kings, 1);
        // 6@22 + 7@23 and 7@23 + 6@24.
        assert_eq!(pairs, 2);
    }

    #[test]
    fn test_status_lost_only_when_no_out_remains() {
        // All twos: no pair sums to 13, no kings anywhere.
        let (tableau, mut piles) = position([Rank::Two; 28], &[Rank::Two]);
        // A draw remains.
        assert_eq!(evaluate_status(&tableau, &piles), GameStatus::InProgress);
        piles.draw().unwrap();
        // Stock empty, recycle limit 0, no legal match: dead position.
        assert_eq!(evaluate_status(&tableau, &piles), GameStatus::Lost);
    }

    #[test]
    fn test_status_in_progress_while_recycle_useful() {
        let suits = Suit::ALL;
        let pyramid = (0..28).map(|i| Card::new(Rank::Two, suits[i % 4])).collect();
        let stock = vec![Card::new(Rank::Two, Suit::Clubs)];
        let tableau = Tableau::deal(pyramid);
        let mut piles = StockWaste::new(stock, 1);

        piles.draw().unwrap();
        // Stock is empty but one recycle remains and the waste is non-empty.
        assert_eq!(evaluate_status(&tableau, &piles), GameStatus::InProgress);
        piles.recycle().unwrap();
        piles.draw().unwrap();
        assert_eq!(evaluate_status(&tableau, &piles), GameStatus::Lost);
    }

    #[test]
    fn test_status_won_ignores_piles() {
        let (mut tableau, piles) = position([Rank::Two; 28], &[Rank::Two]);
        for id in (0..SLOT_COUNT as u8).rev() {
            tableau.remove(SlotId::new(id)).unwrap();
        }
        assert_eq!(evaluate_status(&tableau, &piles), GameStatus::Won);
    }
}
