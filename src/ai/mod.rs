//! Move choice: the agent trait, the minimax engine with its evaluator, and
//! random, skill-limited and human agents.

mod agent;
pub mod evaluator;
mod human;
pub mod minimax;
mod random;
mod selector;

pub use agent::Agent;
pub use human::{HumanAgent, LineReader};
pub use minimax::{Minimax, SearchObserver, SearchResult, SearchStats};
pub use random::{random_move, RandomAgent};
pub use selector::{MoveSelector, MAX_SKILL};
