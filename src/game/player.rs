use super::board::Cell;

/// The two sides. Yellow is the maximizer and Red the minimizer under the
/// engine's score convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Yellow,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Red => Cell::Red,
            Player::Yellow => Cell::Yellow,
        }
    }

    /// Whether this player seeks higher scores.
    pub fn is_maximizer(self) -> bool {
        matches!(self, Player::Yellow)
    }

    /// The player whose marks are placed on a maximizing (or minimizing) ply.
    pub fn from_polarity(maximizing: bool) -> Player {
        if maximizing {
            Player::Yellow
        } else {
            Player::Red
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Yellow => "Yellow",
        }
    }

    /// Single-letter mark used when rendering the board.
    pub fn symbol(self) -> char {
        match self {
            Player::Red => 'R',
            Player::Yellow => 'Y',
        }
    }
}
