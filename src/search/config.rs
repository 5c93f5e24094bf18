//! Search engine configuration

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    evaluation::{EvaluatorKind, MotifWeights},
};

/// How the root picks among equally valued moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First best move in generator order.
    #[default]
    First,
    /// Uniform among the best moves.
    Random,
    /// Keep a forced win as found; otherwise prefer the best motif shape.
    Motif,
}

/// Parameters of a [`crate::search::SearchEngine`].
///
/// # Examples
///
/// ```
/// use push_battle::search::{SearchConfig, TieBreak};
///
/// let config = SearchConfig::alpha_beta(3).with_tie_break(TieBreak::Random).with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Plies searched below the root. Must be at least 1.
    pub depth: usize,
    /// Enable alpha-beta pruning below the root.
    pub pruning: bool,
    pub tie_break: TieBreak,
    /// Evaluator applied at the horizon.
    pub evaluator: EvaluatorKind,
    /// Weights for the motif evaluator and the motif tie-break.
    pub motif_weights: MotifWeights,
    /// Seed for tie-break randomness. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl SearchConfig {
    /// Plain minimax with the material evaluator.
    pub fn minimax(depth: usize) -> Self {
        SearchConfig {
            depth,
            pruning: false,
            tie_break: TieBreak::First,
            evaluator: EvaluatorKind::Material,
            motif_weights: MotifWeights::default(),
            seed: None,
        }
    }

    /// Minimax with alpha-beta pruning.
    pub fn alpha_beta(depth: usize) -> Self {
        SearchConfig {
            pruning: true,
            ..Self::minimax(depth)
        }
    }

    /// Alpha-beta with motif-ranked tie-breaking at the root.
    pub fn hybrid(depth: usize) -> Self {
        SearchConfig {
            tie_break: TieBreak::Motif,
            ..Self::alpha_beta(depth)
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
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

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            return Err(Error::config("search depth must be at least 1"));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::alpha_beta(3)
    }
}
