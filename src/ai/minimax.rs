use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::SearchConfig;
use crate::game::{Board, MoveError, Player, COLS};

use super::agent::Agent;
use super::evaluator::{evaluate, is_better_for, DEPTH_CUTOFF_SCORE};

/// Hooks called while the tree is walked. Both default to doing nothing.
pub trait SearchObserver {
    fn on_node(&mut self, _depth: usize) {}
    fn on_cutoff(&mut self, _depth: usize) {}
}

impl SearchObserver for () {}

/// Node and cutoff counters for one or more searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

impl SearchObserver for SearchStats {
    fn on_node(&mut self, _depth: usize) {
        self.nodes += 1;
    }

    fn on_cutoff(&mut self, _depth: usize) {
        self.cutoffs += 1;
    }
}

/// Score of one candidate column at the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub column: usize,
    pub score: i32,
}

/// Depth-limited minimax agent with alpha-beta pruning.
///
/// Yellow maximizes and Red minimizes. Columns are explored in ascending
/// order, and equally scored root moves are broken uniformly at random.
pub struct Minimax {
    max_depth: usize,
    center_opening: bool,
    rng: StdRng,
}

impl Minimax {
    pub fn new(max_depth: usize) -> Self {
        Minimax {
            max_depth,
            center_opening: true,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Engine whose tie-breaks are reproducible.
    pub fn with_seed(max_depth: usize, seed: u64) -> Self {
        Minimax {
            max_depth,
            center_opening: true,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: &SearchConfig, seed: Option<u64>) -> Self {
        let engine = match seed {
            Some(seed) => Self::with_seed(config.max_depth, seed),
            None => Self::new(config.max_depth),
        };
        engine.with_center_opening(config.center_opening)
    }

    /// Whether an empty board is answered with the center column without searching.
    pub fn with_center_opening(mut self, enabled: bool) -> Self {
        self.center_opening = enabled;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Minimax value of `board` reached `depth` plies below the root, with
    /// `maximizing` telling whose mark the next ply places.
    ///
    /// Every speculative placement is undone before this returns, so the
    /// board is unchanged on exit.
    pub fn search<O>(
        &self,
        board: &mut Board,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        observer: &mut O,
    ) -> i32
    where
        O: SearchObserver + ?Sized,
    {
        observer.on_node(depth);

        if depth > self.max_depth {
            return DEPTH_CUTOFF_SCORE;
        }

        let outcome = board.outcome();
        if outcome.is_terminal() {
            return evaluate(outcome, depth);
        }

        let mover = Player::from_polarity(maximizing);
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for col in board.legal_columns() {
            let score = {
                let Some(mut placed) = board.place(col, mover) else {
                    continue;
                };
                self.search(&mut placed, depth + 1, alpha, beta, !maximizing, &mut *observer)
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if beta <= alpha {
                observer.on_cutoff(depth);
                break;
            }
        }

        best
    }

    /// Score every legal column for the player to move, in ascending column order.
    pub fn scores(&self, board: &mut Board) -> Vec<SearchResult> {
        let mover = board.current_player();
        let mut stats = SearchStats::default();
        let mut results = Vec::new();

        for column in board.legal_columns() {
            let Some(mut placed) = board.place(column, mover) else {
                continue;
            };
            let score = self.search(
                &mut placed,
                1,
                i32::MIN,
                i32::MAX,
                !mover.is_maximizer(),
                &mut stats,
            );
            results.push(SearchResult { column, score });
        }

        debug!(
            player = mover.name(),
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            max_depth = self.max_depth,
            "search finished"
        );
        results
    }

    /// Best score for the player to move and every column that reaches it.
    /// `None` when no column is legal.
    pub fn best_columns(&self, board: &mut Board) -> Option<(i32, Vec<usize>)> {
        let mover = board.current_player();
        let mut best_score = None;
        let mut best_cols = Vec::new();

        for SearchResult { column, score } in self.scores(board) {
            match best_score {
                Some(current) if score == current => best_cols.push(column),
                Some(current) if !is_better_for(mover, score, current) => {}
                _ => {
                    best_score = Some(score);
                    best_cols.clear();
                    best_cols.push(column);
                }
            }
        }

        best_score.map(|score| (score, best_cols))
    }

    /// Pick a best column for the player to move and drop it on `board`.
    pub fn best_move(&mut self, board: &mut Board) -> Result<usize, MoveError> {
        let column = if self.center_opening && board.placed() == 0 {
            COLS / 2
        } else {
            let (score, best) = self
                .best_columns(board)
                .ok_or(MoveError::NoLegalMoves)?;
            let column = best[self.rng.random_range(0..best.len())];
            debug!(score, ?best, column, "picked among best columns");
            column
        };

        board.drop_piece(column)?;
        Ok(column)
    }
}

impl Agent for Minimax {
    fn play(&mut self, board: &mut Board) -> Result<usize, MoveError> {
        self.best_move(board)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::evaluator::WIN_SCORE;
    use crate::ai::RandomAgent;
    use crate::game::{board_from_moves, Outcome, TIE_SEQUENCE};

    const POSITIONS: [&[usize]; 5] = [
        &[],
        &[3, 3],
        &[0, 0, 1, 1, 2, 2],
        &[6, 0, 6, 1, 5, 2],
        &[3, 2, 3, 4, 2, 4, 1, 5, 5, 3],
    ];

    // --- Search invariants ---

    #[test]
    fn search_leaves_board_unchanged() {
        let engine = Minimax::with_seed(4, 7);
        let windows = [(i32::MIN, i32::MAX), (-5, 5), (0, 0), (100, -100)];

        for moves in POSITIONS {
            let mut board = board_from_moves(moves);
            let before = board;
            for &(alpha, beta) in &windows {
                for maximizing in [true, false] {
                    engine.search(&mut board, 1, alpha, beta, maximizing, &mut ());
                    assert_eq!(board, before, "moves {moves:?} window ({alpha}, {beta})");
                }
            }
        }
    }

    #[test]
    fn scores_and_best_columns_leave_board_unchanged() {
        let engine = Minimax::with_seed(4, 7);
        for moves in POSITIONS {
            let mut board = board_from_moves(moves);
            let before = board;
            engine.scores(&mut board);
            engine.best_columns(&mut board);
            assert_eq!(board, before, "moves {moves:?}");
        }
    }

    #[test]
    fn search_past_depth_limit_is_neutral() {
        let engine = Minimax::new(2);
        // Red already owns the bottom row here, but the horizon comes first
        let mut board = board_from_moves(&[0, 6, 1, 6, 2, 6, 3]);
        let mut stats = SearchStats::default();
        let score = engine.search(&mut board, 3, i32::MIN, i32::MAX, true, &mut stats);
        assert_eq!(score, DEPTH_CUTOFF_SCORE);
        assert_eq!(stats.nodes, 1);
    }

    #[test]
    fn search_scores_terminal_positions_by_depth() {
        let engine = Minimax::new(6);
        let mut board = board_from_moves(&[0, 6, 1, 6, 2, 6, 3]);
        let score = engine.search(&mut board, 2, i32::MIN, i32::MAX, true, &mut ());
        assert_eq!(score, -WIN_SCORE + 2);

        let mut tie = board_from_moves(&TIE_SEQUENCE);
        assert_eq!(engine.search(&mut tie, 1, i32::MIN, i32::MAX, false, &mut ()), 0);
    }

    #[test]
    fn pruning_cuts_branches() {
        let engine = Minimax::new(4);
        let mut board = board_from_moves(&[3, 3]);
        let mut stats = SearchStats::default();
        engine.search(&mut board, 1, i32::MIN, i32::MAX, false, &mut stats);
        assert!(stats.cutoffs > 0, "expected cutoffs, got {stats:?}");
        // A full depth-4 tree below this node has 1 + 7 + 49 + 343 + 2401 nodes
        assert!(stats.nodes < 2801, "pruning should skip nodes, got {stats:?}");
    }

    // --- Move choice ---

    #[test]
    fn takes_winning_move() {
        // Red has 0,1,2 on the bottom row and Yellow sits on top of them
        let mut board = board_from_moves(&[0, 0, 1, 1, 2, 2]);
        let engine = Minimax::with_seed(4, 1);
        let (score, best) = engine.best_columns(&mut board).unwrap();
        assert_eq!(best, vec![3]);
        assert_eq!(score, -WIN_SCORE + 1);
    }

    #[test]
    fn maximizer_prefers_win_over_block() {
        // Yellow holds 0,1,2 and Red holds 4,5,6 on the bottom row; Yellow to move
        let mut board = board_from_moves(&[6, 0, 6, 1, 5, 2, 4]);
        assert_eq!(board.current_player(), Player::Yellow);
        let mut engine = Minimax::with_seed(4, 1);
        assert_eq!(engine.best_move(&mut board), Ok(3));
        assert_eq!(board.outcome(), Outcome::Winner(Player::Yellow));
    }

    #[test]
    fn blocks_opponent_win() {
        // Yellow has [0,1,2] at the bottom row. Red must play col 3 to block.
        let mut board = board_from_moves(&[6, 0, 6, 1, 5, 2]);
        assert_eq!(board.current_player(), Player::Red);
        let mut engine = Minimax::with_seed(4, 1);
        assert_eq!(engine.best_move(&mut board), Ok(3));
        assert_eq!(board.get(5, 3), crate::game::Cell::Red);
    }

    #[test]
    fn best_move_is_member_of_best_set() {
        for seed in 0..10 {
            let mut board = board_from_moves(&[3, 2, 3, 4]);
            let engine = Minimax::with_seed(4, seed);
            let (_, best) = engine.best_columns(&mut board).unwrap();

            let mut engine = Minimax::with_seed(4, seed);
            let column = engine.best_move(&mut board).unwrap();
            assert!(best.contains(&column), "{column} not in {best:?}");
            assert_eq!(board.placed(), 5);
        }
    }

    #[test]
    fn ties_are_broken_randomly() {
        // Nothing is decidable two plies into an empty board, so every column ties
        let mut picked = std::collections::HashSet::new();
        for seed in 0..50 {
            let mut board = Board::new();
            let mut engine = Minimax::with_seed(2, seed).with_center_opening(false);
            picked.insert(engine.best_move(&mut board).unwrap());
        }
        assert!(picked.len() > 1, "tie-break never varied: {picked:?}");
    }

    #[test]
    fn opens_in_the_center() {
        let mut board = Board::new();
        let mut engine = Minimax::new(9);
        assert_eq!(engine.best_move(&mut board), Ok(3));
        assert_eq!(board.get(5, 3), crate::game::Cell::Red);
    }

    #[test]
    fn full_board_has_no_move() {
        let mut board = board_from_moves(&TIE_SEQUENCE);
        let mut engine = Minimax::new(4);
        assert_eq!(engine.best_move(&mut board), Err(MoveError::NoLegalMoves));
    }

    #[test]
    fn from_config_respects_settings() {
        let config = SearchConfig {
            max_depth: 3,
            center_opening: false,
        };
        let engine = Minimax::from_config(&config, Some(11));
        assert_eq!(engine.max_depth(), 3);
        assert!(!engine.center_opening);
    }

    // --- Integration ---

    #[test]
    fn full_game_vs_self_completes() {
        let mut red = Minimax::with_seed(3, 1);
        let mut yellow = Minimax::with_seed(3, 2);
        let mut board = Board::new();

        while !board.outcome().is_terminal() {
            let before = board.placed();
            if board.current_player() == Player::Red {
                red.play(&mut board).unwrap();
            } else {
                yellow.play(&mut board).unwrap();
            }
            assert_eq!(board.placed(), before + 1);
        }

        assert!(board.outcome().is_terminal());
    }

    #[test]
    fn beats_random_agent() {
        let games = 10;
        let mut wins = 0;

        for game in 0..games {
            let mut minimax = Minimax::with_seed(4, game);
            let mut random = RandomAgent::with_seed(1_000 + game);
            let mut board = Board::new();

            while !board.outcome().is_terminal() {
                if board.current_player() == Player::Yellow {
                    minimax.play(&mut board).unwrap();
                } else {
                    random.play(&mut board).unwrap();
                }
            }

            if board.outcome() == Outcome::Winner(Player::Yellow) {
                wins += 1;
            }
        }

        assert!(wins >= 7, "Minimax should beat random, won {wins}/{games}");
    }

    #[test]
    fn name_is_minimax() {
        let agent = Minimax::new(4);
        assert_eq!(agent.name(), "Minimax");
    }
}
