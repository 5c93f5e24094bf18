//! Repository port for learned agent persistence.

use std::path::Path;

use crate::{Result, q_learning::SavedQAgent};

/// Port for persisting and loading saved Q-learning agents.
///
/// # Examples
///
/// ```no_run
/// use push_battle::{
///     adapters::MsgPackRepository,
///     ports::AgentRepository,
///     q_learning::{QLearningAgent, SavedQAgent},
///     rules::Player,
/// };
/// use std::path::Path;
///
/// let agent = QLearningAgent::new(Player::One);
/// MsgPackRepository.save(&SavedQAgent::from_agent(&agent), Path::new("agent.msgpack"))?;
/// # Ok::<(), push_battle::Error>(())
/// ```
pub trait AgentRepository {
    /// Save an agent snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization fails.
    fn save(&self, agent: &SavedQAgent, path: &Path) -> Result<()>;

    /// Load an agent snapshot.
    ///
    /// # Errors
    ///
    /// Returns an I/O error whose [`crate::Error::is_not_found`] is true when
    /// nothing is stored at `path`, or a serialization error for corrupted data.
    fn load(&self, path: &Path) -> Result<SavedQAgent>;
}
