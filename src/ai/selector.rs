use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::AppConfig;
use crate::game::{Board, MoveError};

use super::agent::Agent;
use super::minimax::Minimax;
use super::random::random_move;

/// Skill at which the selector always searches.
pub const MAX_SKILL: u8 = 100;

/// Bot that mixes searched moves with random ones to simulate imperfect play.
///
/// Each turn a roll in `0..100` is drawn; a roll above the skill threshold
/// plays a random legal column, anything else asks the engine for its best move.
pub struct MoveSelector {
    skill: u8,
    engine: Minimax,
    rng: StdRng,
    name: String,
}

impl MoveSelector {
    pub fn new(skill: u8, engine: Minimax) -> Self {
        Self::with_rng(skill, engine, StdRng::from_os_rng())
    }

    pub fn with_seed(skill: u8, engine: Minimax, seed: u64) -> Self {
        Self::with_rng(skill, engine, StdRng::seed_from_u64(seed))
    }

    fn with_rng(skill: u8, engine: Minimax, rng: StdRng) -> Self {
        let skill = skill.min(MAX_SKILL);
        MoveSelector {
            skill,
            engine,
            rng,
            name: format!("Bot (skill {skill})"),
        }
    }

    /// Bot built from the `[search]` and `[bot]` sections.
    pub fn from_config(config: &AppConfig) -> Self {
        let engine = Minimax::from_config(&config.search, config.bot.seed);
        match config.bot.seed {
            // Offset so the roll stream differs from the engine's tie-break stream
            Some(seed) => Self::with_seed(config.bot.skill, engine, seed.wrapping_add(1)),
            None => Self::new(config.bot.skill, engine),
        }
    }

    pub fn skill(&self) -> u8 {
        self.skill
    }

    /// Play either a searched or a random column, depending on the roll.
    pub fn choose_move(&mut self, board: &mut Board) -> Result<usize, MoveError> {
        let roll: u8 = self.rng.random_range(0..MAX_SKILL);
        self.decide(roll, board)
    }

    /// Play for a given roll: strictly above the skill is random, anything
    /// else searches. Skill 0 therefore still searches on a roll of 0.
    fn decide(&mut self, roll: u8, board: &mut Board) -> Result<usize, MoveError> {
        if roll > self.skill {
            let column = random_move(board, &mut self.rng)?;
            debug!(roll, skill = self.skill, column, "random move");
            Ok(column)
        } else {
            self.engine.best_move(board)
        }
    }
}

impl Agent for MoveSelector {
    fn play(&mut self, board: &mut Board) -> Result<usize, MoveError> {
        self.choose_move(board)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
