use crate::game::{Board, MoveError};

/// Universal interface for anything that can take a turn.
pub trait Agent {
    /// Choose a column for the player to move and drop it on `board`.
    /// Returns the column played. A rejected choice leaves `board` untouched.
    fn play(&mut self, board: &mut Board) -> Result<usize, MoveError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
