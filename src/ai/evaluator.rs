use crate::game::{Outcome, Player};

/// Magnitude of a win found at the root. Wins further down the tree score
/// slightly less so the engine prefers the quickest win and the slowest loss.
pub const WIN_SCORE: i32 = 1_000;

/// Score given to a position reached past the depth limit. Positions at the
/// horizon are treated as neutral whatever their shape; there is no positional
/// heuristic.
pub const DEPTH_CUTOFF_SCORE: i32 = 0;

/// Score a finished position reached `depth` plies below the root.
///
/// Positive scores favour the maximizer (Yellow), negative scores the
/// minimizer (Red). `InProgress` is scored like a tie.
pub fn evaluate(outcome: Outcome, depth: usize) -> i32 {
    let depth = depth as i32;
    match outcome {
        Outcome::Winner(player) if player.is_maximizer() => WIN_SCORE - depth,
        Outcome::Winner(_) => -WIN_SCORE + depth,
        Outcome::Tie | Outcome::InProgress => 0,
    }
}

/// True when `a` is strictly preferable to `b` for `player`.
pub fn is_better_for(player: Player, a: i32, b: i32) -> bool {
    if player.is_maximizer() {
        a > b
    } else {
        a < b
    }
}
