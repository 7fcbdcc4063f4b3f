//! Pyramid (Match-13) solitaire game engine
//!
//! A pure state-and-command core: the tableau dependency graph, stock/waste
//! cycling, match legality, and win/loss determination. Rendering and input
//! belong to an external view layer that polls snapshots and issues commands.

pub mod core;
pub mod game;
pub mod error;

pub use error::{PyramidError, Result};
