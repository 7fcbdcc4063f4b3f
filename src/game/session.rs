//! Game session: command dispatch over one game
//!
//! The session owns the state and is its only mutator. Every command either
//! returns a fresh snapshot or a typed failure, with no partial mutation on
//! the failure path; failures from the piles and the match engine pass
//! through unchanged.

use crate::game::matcher::{self, Source};
use crate::game::snapshot::Snapshot;
use crate::game::state::{GameState, GameStatus};
use crate::{PyramidError, Result};
use serde::{Deserialize, Serialize};

/// A player command against the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Turn the top stock card onto the waste
    Draw,
    /// Recycle the waste back into the stock (bounded)
    Recycle,
    /// Remove a lone exposed King
    RemoveSingle(Source),
    /// Remove two exposed cards summing to 13
    RemovePair(Source, Source),
}

/// One game of Pyramid from deal to terminal state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    state: GameState,
}

impl GameSession {
    pub fn new(seed: u64, recycle_limit: u32) -> Self {
        GameSession {
            state: GameState::new_game(seed, recycle_limit),
        }
    }

    /// Wrap an externally built position (scripted scenarios, tests). The
    /// status is re-derived immediately so a dead or already-won position is
    /// never reported as InProgress.
    pub fn from_state(mut state: GameState) -> Self {
        state.refresh_status();
        GameSession { state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Dispatch one command. Rejected outright with `GameOver` once the
    /// status is terminal; otherwise routed to the piles or the match
    /// engine, with the status re-derived after any successful mutation.
    pub fn apply(&mut self, command: Command) -> Result<Snapshot> {
        if self.state.status.is_terminal() {
            return Err(PyramidError::GameOver);
        }
        match command {
            Command::Draw => {
                self.state.piles.draw()?;
            }
            Command::Recycle => {
                self.state.piles.recycle()?;
            }
            Command::RemoveSingle(source) => {
                matcher::remove_single(&mut self.state.tableau, &mut self.state.piles, source)?;
            }
            Command::RemovePair(a, b) => {
                matcher::remove_pair(&mut self.state.tableau, &mut self.state.piles, a, b)?;
            }
        }
        self.state.refresh_status();
        Ok(self.snapshot())
    }

    /// Every command that would currently succeed. Empty exactly when the
    /// status is terminal: any non-terminal position has a draw, a useful
    /// recycle, or a legal match by construction of the loss check.
    pub fn legal_moves(&self) -> Vec<Command> {
        if self.state.status.is_terminal() {
            return Vec::new();
        }
        let mut moves: Vec<Command> =
            matcher::legal_matches(&self.state.tableau, &self.state.piles)
                .into_iter()
                .map(|(a, b)| match b {
                    None => Command::RemoveSingle(a),
                    Some(b) => Command::RemovePair(a, b),
                })
                .collect();
        if self.state.piles.stock_len() > 0 {
            moves.push(Command::Draw);
        } else if self.state.piles.can_recycle() {
            moves.push(Command::Recycle);
        }
        moves
    }
}
