//! Core value types: cards and the deck

pub mod card;
pub mod deck;

pub use card::{Card, Rank, Suit};
pub use deck::{Deck, DECK_SIZE, PYRAMID_SIZE, STOCK_SIZE};
