//! Core Connect Four game logic: the board with gravity drops, whose-turn
//! state and outcome detection, and the two players.

mod board;
mod player;

pub use board::{Board, Cell, LegalColumns, MoveError, Outcome, Placement, CELLS, COLS, ROWS};
pub use player::Player;

#[cfg(test)]
pub(crate) use board::tests::{board_from_moves, TIE_SEQUENCE};
