//! Serialization support for Q-learning agents.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    q_learning::{agent::{QLearningAgent, TrainingStats}, q_table::QTable},
    rules::Player,
};

/// Everything needed to restore a [`QLearningAgent`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedQAgent {
    pub version: u32,
    pub player: Player,
    pub q_table: QTable,
    pub epsilon: f64,
    pub epsilon_decay: f64,
    pub min_epsilon: f64,
    pub rng_seed: Option<u64>,
    pub stats: TrainingStats,
}

impl SavedQAgent {
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &QLearningAgent) -> Self {
        agent.to_saved()
    }

    /// Rebuild the agent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedVersion`] for snapshots written by another
    /// format version.
    pub fn into_agent(self) -> Result<QLearningAgent> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(QLearningAgent::from_saved(self))
    }
}
