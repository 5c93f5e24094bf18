//! Tabular Q-learning
//!
//! The agent keeps a value per (position, move) pair and learns from whole
//! episodes: after each game the final reward is propagated backwards over
//! the agent's own decisions, discounted by how far each decision was from
//! the end.
//!
//! ## Usage Example
//!
//! ```no_run
//! use push_battle::{
//!     q_learning::{QLearningAgent, QLearningConfig},
//!     rules::Player,
//! };
//!
//! let config = QLearningConfig::default().with_seed(7);
//! let agent = QLearningAgent::with_config(Player::One, config)?;
//! agent.save("agent.msgpack")?;
//! # Ok::<(), push_battle::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod q_table;
pub mod serialization;

pub use agent::{QLearningAgent, TrainingStats};
pub use config::QLearningConfig;
pub use q_table::QTable;
pub use serialization::SavedQAgent;
