//! Random auto-player for playout testing and benchmarks
//!
//! Picks uniformly among the legal commands with its own seeded RNG.
//! Playouts always terminate: draws are bounded by the stock size times the
//! recycle allowance, and every match shrinks the 52-card pool.

use crate::game::session::{Command, GameSession};
use crate::game::state::GameStatus;
use crate::Result;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Hard cap on commands per playout; generous, a game never needs more than
/// ~170 (24 draws per pass, three passes, 28 removals).
const MAX_COMMANDS: usize = 1_000;

pub struct RandomController {
    rng: ChaCha12Rng,
}

impl RandomController {
    pub fn with_seed(seed: u64) -> Self {
        RandomController {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// Uniform choice among the given commands.
    pub fn choose(&mut self, moves: &[Command]) -> Option<Command> {
        if moves.is_empty() {
            None
        } else {
            Some(moves[self.rng.gen_range(0..moves.len())])
        }
    }

    /// Drive a session to its terminal status.
    pub fn play_out(&mut self, session: &mut GameSession) -> Result<GameStatus> {
        for _ in 0..MAX_COMMANDS {
            if session.status().is_terminal() {
                break;
            }
            let moves = session.legal_moves();
            match self.choose(&moves) {
                Some(cmd) => {
                    session.apply(cmd)?;
                }
                None => break,
            }
        }
        Ok(session.status())
    }
}
