//! Aggregate game state

use crate::core::Deck;
use crate::game::matcher;
use crate::game::stock::StockWaste;
use crate::game::tableau::Tableau;
use serde::{Deserialize, Serialize};

/// Lifecycle tag. `Won` and `Lost` are terminal; no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Complete state of one Pyramid game: the 28-slot tableau, the stock and
/// waste piles, and the status tag. Exclusively owned by the session driving
/// it; mutation happens only through session commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tableau: Tableau,
    pub piles: StockWaste,
    pub status: GameStatus,
}

impl GameState {
    /// Shuffle with `seed`, deal 28 cards into the pyramid and 24 into the
    /// stock. A fresh deal always has a full stock, so it starts InProgress.
    pub fn new_game(seed: u64, recycle_limit: u32) -> Self {
        let (pyramid, stock) = Deck::shuffled(seed).deal();
        GameState {
            tableau: Tableau::deal(pyramid),
            piles: StockWaste::new(stock, recycle_limit),
            status: GameStatus::InProgress,
        }
    }

    /// Re-derive the status tag after a successful mutation. Terminal states
    /// stick.
    pub fn refresh_status(&mut self) {
        if self.status == GameStatus::InProgress {
            self.status = matcher::evaluate_status(&self.tableau, &self.piles);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, DECK_SIZE, PYRAMID_SIZE, STOCK_SIZE};
    use std::collections::HashSet;

    #[test]
    fn test_new_game_partitions_52_cards() {
        for seed in 0..20 {
            let state = GameState::new_game(seed, 2);
            let mut all: Vec<Card> = state.tableau.slots().iter().map(|s| s.card).collect();
            all.extend_from_slice(state.piles.stock());

            assert_eq!(state.tableau.slots().len(), PYRAMID_SIZE);
            assert_eq!(state.piles.stock_len(), STOCK_SIZE);
            assert_eq!(all.len(), DECK_SIZE);
            let unique: HashSet<Card> = all.into_iter().collect();
            assert_eq!(unique.len(), DECK_SIZE);
        }
    }

    #[test]
    fn test_new_game_starts_in_progress() {
        let state = GameState::new_game(42, 2);
        assert_eq!(state.status, GameStatus::InProgress);
        assert!(!state.status.is_terminal());
        assert!(GameStatus::Won.is_terminal());
        assert!(GameStatus::Lost.is_terminal());
    }

    #[test]
    fn test_new_game_deterministic() {
        let a = GameState::new_game(42, 2);
        let b = GameState::new_game(42, 2);
        let cards = |s: &GameState| -> Vec<Card> {
            s.tableau
                .slots()
                .iter()
                .map(|slot| slot.card)
                .chain(s.piles.stock().iter().copied())
                .collect()
        };
        assert_eq!(cards(&a), cards(&b));
    }
}
