//! Push Battle: a two-player game on an 8x8 torus
//!
//! This crate provides:
//! - Game rules with the push effect, make/undo, and move generation
//! - Material and motif position evaluators
//! - Minimax, alpha-beta, and motif-blended search agents
//! - A tabular Q-learning agent with training and persistence
//! - Judge-facing snapshot decoding and the move wire format

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod evaluation;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod rules;
pub mod search;
pub mod types;

pub use error::{Error, Result};
pub use evaluation::{
    Evaluator, EvaluatorKind, MaterialEvaluator, MotifEvaluator, MotifWeights, Score,
};
pub use q_learning::{QLearningAgent, QLearningConfig};
pub use rules::{ExternalState, Game, GameOutcome, GameState, Move, Player};
pub use search::{SearchAgent, SearchConfig, TieBreak};
pub use types::StateKey;
