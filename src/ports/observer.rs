//! Observer port - abstraction for training observation and data collection

use std::path::Path;

use crate::{
    Result,
    rules::{GameOutcome, GameState, Move},
};

/// Observer trait for monitoring training
///
/// Observers can be composed to collect different data during training:
/// progress bars, metrics, or custom logging.
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_move(...)` - for each move in the episode
///    - `on_episode_end(episode, outcome, plies)`
///    - `on_checkpoint(...)` - when a checkpoint was written
/// 3. `on_training_end()` - once at the end
pub trait Observer: Send {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a move is chosen, with the state before the move.
    fn on_move(
        &mut self,
        _episode: usize,
        _ply: usize,
        _state: &GameState,
        _mv: Move,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once the episode has an outcome, before the next one starts.
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _outcome: GameOutcome,
        _plies: usize,
    ) -> Result<()> {
        Ok(())
    }

    fn on_checkpoint(&mut self, _episode: usize, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
