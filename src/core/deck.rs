//! Deck construction, seeded shuffling, and the pyramid deal

use crate::core::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

pub const DECK_SIZE: usize = 52;
pub const PYRAMID_SIZE: usize = 28;
pub const STOCK_SIZE: usize = DECK_SIZE - PYRAMID_SIZE;

/// A full 52-card deck in shuffled order
///
/// The deck exists only between shuffle and deal; `deal` consumes it so no
/// stale ordering can be reused after the cards move into the tableau and
/// stock.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build all 52 cards and permute them with a ChaCha12 RNG seeded from
    /// `seed`. The same seed yields the same order on every platform, which
    /// is what makes deals reproducible in tests.
    pub fn shuffled(seed: u64) -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        cards.shuffle(&mut rng);
        Deck { cards }
    }

    /// Split the deck into the 28 pyramid cards (row-major, row 1 first) and
    /// the 24-card stock. Stock draw order is the remaining deck order, top
    /// of stock last.
    pub fn deal(mut self) -> (Vec<Card>, Vec<Card>) {
        let stock = self.cards.split_off(PYRAMID_SIZE);
        (self.cards, stock)
    }
}
