//! Configuration types for agent creation.

use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    evaluation::{EvaluatorKind, MotifWeights},
    q_learning::QLearningConfig,
    search::SearchConfig,
};

/// Search depth used when a search agent is configured without one.
pub const DEFAULT_DEPTH: usize = 3;

/// Which kind of player to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Random,
    Minimax,
    AlphaBeta,
    Hybrid,
    QLearning,
}

impl AgentKind {
    pub fn is_search(self) -> bool {
        matches!(self, AgentKind::Minimax | AgentKind::AlphaBeta | AgentKind::Hybrid)
    }
}

impl FromStr for AgentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(AgentKind::Random),
            "minimax" => Ok(AgentKind::Minimax),
            "alphabeta" | "alpha-beta" | "ab" => Ok(AgentKind::AlphaBeta),
            "hybrid" => Ok(AgentKind::Hybrid),
            "q" | "qlearning" | "q-learning" => Ok(AgentKind::QLearning),
            other => Err(Error::config(format!("unknown agent kind '{other}'"))),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentKind::Random => "random",
            AgentKind::Minimax => "minimax",
            AgentKind::AlphaBeta => "alphabeta",
            AgentKind::Hybrid => "hybrid",
            AgentKind::QLearning => "qlearning",
        };
        f.write_str(name)
    }
}

/// Configuration for creating an agent.
///
/// # Examples
///
/// ```
/// use push_battle::app::{AgentConfig, AgentKind};
///
/// let config = AgentConfig::new(AgentKind::Hybrid).with_depth(2).with_seed(42);
/// assert_eq!(config.search_config().unwrap().depth, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub kind: AgentKind,
    /// Search depth for search agents
    pub depth: usize,
    /// Horizon evaluator for search agents
    pub evaluator: EvaluatorKind,
    pub motif_weights: MotifWeights,
    /// Saved Q-learning agent to load
    pub model_path: Option<PathBuf>,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub fn new(kind: AgentKind) -> Self {
        Self {
            kind,
            depth: DEFAULT_DEPTH,
            evaluator: EvaluatorKind::default(),
            motif_weights: MotifWeights::default(),
            model_path: None,
            seed: None,
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_evaluator(mut self, evaluator: EvaluatorKind) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn with_motif_weights(mut self, weights: MotifWeights) -> Self {
        self.motif_weights = weights;
        self
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Engine configuration for search kinds, `None` otherwise.
    pub fn search_config(&self) -> Option<SearchConfig> {
        let base = match self.kind {
            AgentKind::Minimax => SearchConfig::minimax(self.depth),
            AgentKind::AlphaBeta => SearchConfig::alpha_beta(self.depth),
            AgentKind::Hybrid => SearchConfig::hybrid(self.depth),
            AgentKind::Random | AgentKind::QLearning => return None,
        };
        let config = base
            .with_evaluator(self.evaluator)
            .with_motif_weights(self.motif_weights);
        Some(match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        })
    }

    /// Hyperparameters for a fresh Q-learning agent.
    pub fn q_learning_config(&self) -> QLearningConfig {
        let config = QLearningConfig::default();
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(AgentKind::AlphaBeta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::TieBreak;

    #[test]
    fn test_kind_parsing_accepts_aliases() {
        assert_eq!("AlphaBeta".parse::<AgentKind>().unwrap(), AgentKind::AlphaBeta);
        assert_eq!("q".parse::<AgentKind>().unwrap(), AgentKind::QLearning);
        assert!("oracle".parse::<AgentKind>().is_err());
    }

    #[test]
    fn test_search_config_follows_kind() {
        let config = AgentConfig::new(AgentKind::Hybrid).with_depth(4).with_seed(9);
        let search = config.search_config().unwrap();
        assert_eq!(search.depth, 4);
        assert_eq!(search.tie_break, TieBreak::Motif);
        assert_eq!(search.seed, Some(9));
        assert!(AgentConfig::new(AgentKind::Random).search_config().is_none());
    }
}
