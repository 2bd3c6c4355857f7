use std::fmt;
use std::ops::{Deref, DerefMut};

use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CELLS: usize = ROWS * COLS;

/// Below this many pieces no player can own four cells, so outcome scans are skipped.
const MIN_PIECES_FOR_WIN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// The player occupying this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Yellow => Some(Player::Yellow),
        }
    }
}

/// Result of scanning a board for a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Tie,
    InProgress,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{} wins!", player.name()),
            Outcome::Tie => write!(f, "Tie game!"),
            Outcome::InProgress => write!(f, "Game in progress"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column must be between 0 and {max}", max = COLS - 1)]
    InvalidColumn,

    #[error("column is full")]
    ColumnFull,

    #[error("no legal columns remain")]
    NoLegalMoves,

    #[error("game is already over")]
    GameOver,

    #[error("failed to read move: {0}")]
    Input(String),
}

/// Columns that can still accept a piece, in ascending order.
pub type LegalColumns = Vec<usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
    placed: usize,
    to_move: Player,
}

impl Board {
    /// Create a new empty board with Red to move
    pub fn new() -> Self {
        Self::with_first_player(Player::Red)
    }

    /// Create a new empty board with the given player to move first
    pub fn with_first_player(first: Player) -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
            placed: 0,
            to_move: first,
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// The player whose piece the next `drop_piece` places.
    pub fn current_player(&self) -> Player {
        self.to_move
    }

    /// Number of pieces on the board.
    pub fn placed(&self) -> usize {
        self.placed
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Row a piece dropped into `col` would land in, or `None` if the column
    /// is full or out of range.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if self.is_column_full(col) {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Drop the current player's piece in a column and pass the turn.
    /// Returns the row where it landed.
    pub fn drop_piece(&mut self, col: usize) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn);
        }

        let row = self.landing_row(col).ok_or(MoveError::ColumnFull)?;
        self.cells[row][col] = self.to_move.to_cell();
        self.placed += 1;
        self.to_move = self.to_move.other();
        Ok(row)
    }

    /// Clear a cell filled by an earlier placement. The turn is left alone.
    pub fn undo(&mut self, col: usize, row: usize) {
        debug_assert!(
            self.cells[row][col] != Cell::Empty,
            "undo of empty cell ({row}, {col})"
        );
        if self.cells[row][col] != Cell::Empty {
            self.cells[row][col] = Cell::Empty;
            self.placed -= 1;
        }
    }

    /// Write `player`'s mark into `col` without passing the turn. The mark is
    /// removed when the returned guard is dropped.
    pub fn place(&mut self, col: usize, player: Player) -> Option<Placement<'_>> {
        let row = self.landing_row(col)?;
        self.cells[row][col] = player.to_cell();
        self.placed += 1;
        Some(Placement {
            board: self,
            row,
            col,
        })
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> LegalColumns {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    pub fn open_spots(&self) -> usize {
        CELLS - self.placed
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.open_spots() == 0
    }

    /// Scan every run of four cells for a winner.
    pub fn outcome(&self) -> Outcome {
        if self.placed >= MIN_PIECES_FOR_WIN {
            if let Some(winner) = self.find_winner() {
                return Outcome::Winner(winner);
            }
        }

        if self.is_full() {
            Outcome::Tie
        } else {
            Outcome::InProgress
        }
    }

    fn find_winner(&self) -> Option<Player> {
        // Horizontal
        for row in 0..ROWS {
            for col in 0..COLS - 3 {
                if let Some(p) = self.line_owner(row, col, 0, 1) {
                    return Some(p);
                }
            }
        }

        // Vertical
        for col in 0..COLS {
            for row in 0..ROWS - 3 {
                if let Some(p) = self.line_owner(row, col, 1, 0) {
                    return Some(p);
                }
            }
        }

        // Diagonal (top-left to bottom-right, \)
        for row in 0..ROWS - 3 {
            for col in 0..COLS - 3 {
                if let Some(p) = self.line_owner(row, col, 1, 1) {
                    return Some(p);
                }
            }
        }

        // Diagonal (bottom-left to top-right, /)
        for row in 3..ROWS {
            for col in 0..COLS - 3 {
                if let Some(p) = self.line_owner(row, col, -1, 1) {
                    return Some(p);
                }
            }
        }

        None
    }

    /// Owner of the four cells starting at (row, col) and stepping by
    /// (d_row, d_col), if all four belong to one player. Callers keep the run
    /// on the board.
    fn line_owner(&self, row: usize, col: usize, d_row: isize, d_col: usize) -> Option<Player> {
        let first = self.cells[row][col].owner()?;
        (1..4)
            .all(|i| {
                let r = (row as isize + d_row * i as isize) as usize;
                self.cells[r][col + d_col * i] == first.to_cell()
            })
            .then_some(first)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = COLS * 2 - 1;
        writeln!(f, "{}", "=".repeat(width))?;
        for (i, row) in self.cells.iter().enumerate() {
            let line: Vec<String> = row
                .iter()
                .map(|cell| cell.owner().map_or(' ', Player::symbol).to_string())
                .collect();
            writeln!(f, "{}", line.join("|"))?;
            if i + 1 < ROWS {
                writeln!(f, "{}", "-".repeat(width))?;
            }
        }
        writeln!(f, "{}", "=".repeat(width))?;
        let footer: Vec<String> = (0..COLS).map(|c| c.to_string()).collect();
        write!(f, "{}", footer.join(" "))
    }
}

/// A speculative mark on a borrowed board. Dereferences to the board so the
/// search can recurse through it; the mark is cleared on drop, whichever way
/// the owning scope exits.
pub struct Placement<'a> {
    board: &'a mut Board,
    row: usize,
    col: usize,
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.undo(self.col, self.row);
    }
}
