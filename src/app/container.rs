//! Dependency injection container.
//!
//! The container owns the agent repository and a default seed, and builds
//! every kind of player from an [`AgentConfig`].

use std::{path::Path, sync::Arc};

use super::config::{AgentConfig, AgentKind};
use crate::{
    Result,
    adapters::MsgPackRepository,
    pipeline::RandomAgent,
    ports::{Agent, AgentRepository},
    q_learning::{QLearningAgent, SavedQAgent},
    rules::Player,
    search::SearchAgent,
};

/// Application with dependency injection.
///
/// # Examples
///
/// ```
/// use push_battle::{
///     app::{AgentConfig, AgentKind, App},
///     ports::Agent,
///     rules::Player,
/// };
///
/// let app = App::new();
/// let agent = app.create_agent(&AgentConfig::new(AgentKind::Minimax).with_depth(1), Player::One)?;
/// assert_eq!(agent.name(), "minimax-d1");
/// # Ok::<(), push_battle::Error>(())
/// ```
pub struct App {
    repository: Arc<dyn AgentRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with `MsgPackRepository` and no default seed.
    pub fn new() -> Self {
        Self {
            repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Builder for injecting test doubles.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn repository(&self) -> Arc<dyn AgentRepository + Send + Sync> {
        Arc::clone(&self.repository)
    }

    /// Build the player described by `config` for the `player` seat.
    ///
    /// Q-learning agents are loaded when `model_path` is set (a missing file
    /// is an error) and untrained otherwise.
    pub fn create_agent(&self, config: &AgentConfig, player: Player) -> Result<Box<dyn Agent>> {
        let seed = config.seed.or(self.default_seed);
        let config = match seed {
            Some(seed) => config.clone().with_seed(seed),
            None => config.clone(),
        };
        match config.kind {
            AgentKind::Random => Ok(Box::new(match seed {
                Some(seed) => RandomAgent::with_seed("random", seed),
                None => RandomAgent::new("random"),
            })),
            AgentKind::QLearning => Ok(Box::new(self.q_agent(&config, player)?)),
            AgentKind::Minimax | AgentKind::AlphaBeta | AgentKind::Hybrid => {
                let search = config.search_config().ok_or_else(|| {
                    crate::Error::config(format!("{} is not a search agent", config.kind))
                })?;
                Ok(Box::new(SearchAgent::new(player, search)?))
            }
        }
    }

    /// Load or create the Q-learning agent described by `config`.
    pub fn q_agent(&self, config: &AgentConfig, player: Player) -> Result<QLearningAgent> {
        let mut agent = match &config.model_path {
            Some(path) => self.load_agent(path)?,
            None => QLearningAgent::with_config(player, config.q_learning_config())?,
        };
        if let Some(seed) = config.seed.or(self.default_seed) {
            agent.set_rng_seed(seed)?;
        }
        Ok(agent)
    }

    /// Load an agent through the configured repository.
    pub fn load_agent(&self, path: &Path) -> Result<QLearningAgent> {
        self.repository.load(path)?.into_agent()
    }

    /// Save an agent through the configured repository.
    pub fn save_agent(&self, agent: &QLearningAgent, path: &Path) -> Result<()> {
        self.repository.save(&SavedQAgent::from_agent(agent), path)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing an app with custom dependencies.
pub struct AppBuilder {
    repository: Option<Arc<dyn AgentRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            default_seed: None,
        }
    }

    pub fn with_repository<R: AgentRepository + Send + Sync + 'static>(mut self, repo: R) -> Self {
        self.repository = Some(Arc::new(repo));
        self
    }

    /// Set a default random seed for all agents created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// If no repository was specified, uses `MsgPackRepository`.
    pub fn build(self) -> App {
        App {
            repository: self
                .repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentConfig {
    /// Build this agent with a default [`App`].
    pub fn build(&self, player: Player) -> Result<Box<dyn Agent>> {
        App::new().create_agent(self, player)
    }
}
