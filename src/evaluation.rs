//! Static position evaluators used at the search horizon.
//!
//! Both evaluators score a position from a fixed player's perspective: higher
//! is better for that player. Terminal positions are scored by the search
//! engine itself with [`WIN_SCORE`] and [`LOSS_SCORE`].

pub mod material;
pub mod motif;

use serde::{Deserialize, Serialize};

pub use material::MaterialEvaluator;
pub use motif::{MotifEvaluator, MotifWeights};

use crate::rules::{GameState, Player};

/// Position score. Higher favours the evaluating player.
pub type Score = i32;

/// Value of a position the evaluating player has won.
pub const WIN_SCORE: Score = Score::MAX;

/// Value of a lost position. Symmetric with [`WIN_SCORE`] so negation is safe.
pub const LOSS_SCORE: Score = -WIN_SCORE;

/// Static evaluation of a non-terminal position.
pub trait Evaluator: Send {
    fn evaluate(&self, state: &GameState, perspective: Player) -> Score;

    fn name(&self) -> &str;
}

/// Serializable choice of evaluator for configuration files and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    #[default]
    Material,
    Motif,
}

impl EvaluatorKind {
    pub fn build(self, weights: MotifWeights) -> Box<dyn Evaluator> {
        match self {
            EvaluatorKind::Material => Box::new(MaterialEvaluator),
            EvaluatorKind::Motif => Box::new(MotifEvaluator::new(weights)),
        }
    }
}
