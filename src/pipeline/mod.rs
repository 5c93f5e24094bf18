//! Training and evaluation pipelines
//!
//! - Training the Q-learning agent against any opponent, with checkpoints
//! - Playing matches and round-robin comparisons between agents
//! - Recording observations during training

pub mod comparison;
pub mod observers;
pub mod training;

pub use comparison::{ComparisonFramework, ComparisonResult, MatchupResult, RandomAgent, play_match};
pub use observers::{
    EpisodeRecord, JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver,
};
pub use training::{DEFAULT_MAX_PLIES, TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Agent, Observer};
