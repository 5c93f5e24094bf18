//! Depth-limited adversarial search
//!
//! One engine covers plain minimax, alpha-beta pruning, and the
//! motif-blended root selection. The state is mutated in place through
//! [`crate::rules::MoveGuard`]s and restored before each call returns.

pub mod agent;
pub mod config;
pub mod engine;

pub use agent::SearchAgent;
pub use config::{SearchConfig, TieBreak};
pub use engine::{SearchEngine, SearchOutcome};
