//! Turn loop that hands a shared board to one agent per player.

use tracing::{debug, info};

use crate::ai::Agent;
use crate::game::{Board, MoveError, Outcome, Player};

/// One completed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub player: Player,
    pub column: usize,
    /// Row the piece landed in, 0 being the top.
    pub row: usize,
    pub outcome: Outcome,
}

/// A single game between two agents.
pub struct GameSession {
    board: Board,
    red: Box<dyn Agent>,
    yellow: Box<dyn Agent>,
}

impl GameSession {
    /// Start from an empty board with Red to move.
    pub fn new(red: Box<dyn Agent>, yellow: Box<dyn Agent>) -> Self {
        Self::with_board(Board::new(), red, yellow)
    }

    pub fn with_board(board: Board, red: Box<dyn Agent>, yellow: Box<dyn Agent>) -> Self {
        GameSession { board, red, yellow }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    fn agent_mut(&mut self, player: Player) -> &mut dyn Agent {
        match player {
            Player::Red => self.red.as_mut(),
            Player::Yellow => self.yellow.as_mut(),
        }
    }

    /// Let the player to move take one turn.
    pub fn step(&mut self) -> Result<Turn, MoveError> {
        if self.outcome().is_terminal() {
            return Err(MoveError::GameOver);
        }

        let player = self.board.current_player();
        let mut board = self.board;
        let agent = self.agent_mut(player);
        let column = agent.play(&mut board)?;
        debug!(player = player.name(), agent = agent.name(), column, "move played");
        // The session's board still holds the position before the move
        let row = self
            .board
            .landing_row(column)
            .ok_or(MoveError::ColumnFull)?;
        self.board = board;

        Ok(Turn {
            player,
            column,
            row,
            outcome: self.board.outcome(),
        })
    }

    /// Play to the end, calling `on_turn` with the board after every move.
    pub fn run<F>(&mut self, mut on_turn: F) -> Result<Outcome, MoveError>
    where
        F: FnMut(&Board, &Turn),
    {
        loop {
            let turn = self.step()?;
            on_turn(&self.board, &turn);
            if turn.outcome.is_terminal() {
                info!(outcome = %turn.outcome, moves = self.board.placed(), "game over");
                return Ok(turn.outcome);
            }
        }
    }
}
