//! # Connect Four Minimax
//!
//! A Connect Four engine that picks moves by depth-limited minimax search with
//! alpha-beta pruning, plus random, skill-limited and human agents to play it
//! against.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, gravity drops, outcome detection
//! - [`ai`] — Agent trait, evaluator, minimax engine, move selector
//! - [`session`] — Turn loop pairing two agents on one board
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod session;
