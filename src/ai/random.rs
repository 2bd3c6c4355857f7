use crate::game::{Board, MoveError};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;

/// Drop the current player's piece in a legal column chosen uniformly at random.
pub fn random_move<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Result<usize, MoveError> {
    let columns = board.legal_columns();
    if columns.is_empty() {
        return Err(MoveError::NoLegalMoves);
    }
    let column = columns[rng.random_range(0..columns.len())];
    board.drop_piece(column)?;
    Ok(column)
}

/// An agent that selects uniformly at random from legal columns.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn play(&mut self, board: &mut Board) -> Result<usize, MoveError> {
        random_move(board, &mut self.rng)
    }

    fn name(&self) -> &str {
        "Random"
    }
}
