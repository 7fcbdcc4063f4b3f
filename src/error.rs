//! Error types for the Pyramid engine
//!
//! Every fallible engine operation reports one of these as a value; no
//! control-flow exceptions cross the command boundary, and no failing
//! operation leaves the game state partially mutated.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PyramidError {
    #[error("slot {0} is not exposed or already removed")]
    IllegalRemoval(u8),

    #[error("proposal is not a lone king or a pair summing to 13")]
    RankMismatch,

    #[error("pair proposal resolves to a single physical card")]
    SameSource,

    #[error("no card at the proposed source")]
    EmptySource,

    #[error("stock is empty")]
    StockEmpty,

    #[error("recycle requires an empty stock and a non-empty waste")]
    RecycleNotAllowed,

    #[error("recycle limit reached")]
    RecycleExhausted,

    #[error("game is already over")]
    GameOver,
}

pub type Result<T> = std::result::Result<T, PyramidError>;
