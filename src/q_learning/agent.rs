//! Epsilon-greedy Q-learning agent

use std::path::Path;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::MsgPackRepository,
    error::{Error, Result},
    ports::{Agent, AgentRepository},
    q_learning::{config::QLearningConfig, q_table::QTable, serialization::SavedQAgent},
    rules::{BOARD_SIZE, GameOutcome, GameState, Move, Player, Square},
};

/// Reward for a won episode; a loss is the negation.
pub const WIN_REWARD: f64 = 1.0;

/// Reward per own piece in the centre block of an undecided final position.
pub const CENTRE_REWARD: f64 = 0.1;

/// Rows and columns of the centre block scored for undecided episodes.
const CENTRE_BLOCK: std::ops::RangeInclusive<usize> = (BOARD_SIZE / 2 - 1)..=(BOARD_SIZE / 2 + 1);

/// Counters persisted alongside the Q-table.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingStats {
    pub episodes_trained: u64,
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
    /// Wall-clock seconds spent in training runs.
    #[serde(default)]
    pub training_seconds: f64,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent playing one fixed side.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    player: Player,
    q_table: QTable,
    epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
    stats: TrainingStats,
}

impl QLearningAgent {
    /// Agent with default hyperparameters and an OS-seeded RNG.
    pub fn new(player: Player) -> Self {
        Self::build(player, QLearningConfig::default())
    }

    /// Agent with validated hyperparameters.
    pub fn with_config(player: Player, config: QLearningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(player, config))
    }

    fn build(player: Player, config: QLearningConfig) -> Self {
        Self {
            player,
            q_table: QTable::new(config.learning_rate, config.discount_factor, config.q_init),
            epsilon: config.epsilon,
            epsilon_decay: config.epsilon_decay,
            min_epsilon: config.min_epsilon,
            rng: build_rng(config.seed),
            rng_seed: config.seed,
            stats: TrainingStats::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    /// Epsilon-greedy choice among the legal moves of `state`.
    ///
    /// Exploration only happens when `training` is set. Greedy choices are
    /// uniform among the moves sharing the highest stored value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalMoves`] if the side to move has no action.
    pub fn choose_action(&mut self, state: &GameState, training: bool) -> Result<Move> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoLegalMoves);
        }
        if training && self.rng.random::<f64>() < self.epsilon {
            return moves.choose(&mut self.rng).copied().ok_or(Error::NoLegalMoves);
        }
        let best = self.q_table.best_actions(&state.state_key(), &moves);
        best.choose(&mut self.rng).copied().ok_or(Error::NoLegalMoves)
    }

    /// Greedy move, the per-turn entry point for a trained agent.
    pub fn get_best_move(&mut self, state: &GameState) -> Result<Move> {
        self.choose_action(state, false)
    }

    /// Reward of a final position from this agent's side.
    ///
    /// Decided games score ±[`WIN_REWARD`]. Undecided ones score
    /// ±[`CENTRE_REWARD`] per piece in the centre 3x3 block.
    pub fn reward(&self, final_state: &GameState) -> f64 {
        match final_state.check_winner() {
            Some(winner) if winner == self.player => WIN_REWARD,
            Some(_) => -WIN_REWARD,
            None => {
                let board = final_state.board();
                CENTRE_BLOCK
                    .flat_map(|r| CENTRE_BLOCK.map(move |c| (r, c)))
                    .filter_map(|(r, c)| Square::new(r, c))
                    .filter_map(|sq| board.get(sq).owner())
                    .map(|owner| if owner == self.player { CENTRE_REWARD } else { -CENTRE_REWARD })
                    .sum()
            }
        }
    }

    /// Learn from one finished episode.
    ///
    /// `history` holds the agent's own decisions in order. Each decision is
    /// updated toward the final reward discounted by its distance from the
    /// end, bootstrapping from the agent's next decision point (or the final
    /// position for the last one). Epsilon decays afterwards.
    ///
    /// Returns the final reward.
    pub fn learn_episode(&mut self, history: &[(GameState, Move)], final_state: &GameState) -> f64 {
        let final_reward = self.reward(final_state);
        let gamma = self.q_table.discount_factor();
        let n = history.len();
        for (i, (state, action)) in history.iter().enumerate() {
            let next = history.get(i + 1).map_or(final_state, |(next, _)| next);
            let next_moves = if next.is_terminal() {
                Vec::new()
            } else {
                next.legal_moves()
            };
            let reward = final_reward * gamma.powi((n - i - 1) as i32);
            self.q_table.q_learning_update(
                &state.state_key(),
                *action,
                reward,
                &next.state_key(),
                &next_moves,
            );
        }
        self.decay_epsilon();
        final_reward
    }

    /// Count a finished episode in the training statistics.
    pub fn record_outcome(&mut self, outcome: GameOutcome) {
        self.stats.episodes_trained += 1;
        match outcome {
            GameOutcome::Win(winner) if winner == self.player => self.stats.wins += 1,
            GameOutcome::Win(_) => self.stats.losses += 1,
            GameOutcome::Draw => self.stats.draws += 1,
        }
    }

    pub(crate) fn add_training_time(&mut self, seconds: f64) {
        self.stats.training_seconds += seconds;
    }

    fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
    }

    /// Write the agent to `path` as MessagePack.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        MsgPackRepository.save(&SavedQAgent::from_agent(self), path.as_ref())
    }

    /// Read an agent saved with [`Self::save`].
    ///
    /// # Errors
    ///
    /// A missing file is an I/O error ([`Error::is_not_found`]); use
    /// [`Self::load_or_new`] to start fresh instead.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        MsgPackRepository.load(path.as_ref())?.into_agent()
    }

    /// Load from `path`, or build a fresh agent if the file does not exist.
    ///
    /// Any other failure (unreadable file, corrupt data, version mismatch) is
    /// returned.
    pub fn load_or_new<P: AsRef<Path>>(
        path: P,
        player: Player,
        config: QLearningConfig,
    ) -> Result<Self> {
        match Self::load(path) {
            Ok(agent) => Ok(agent),
            Err(e) if e.is_not_found() => Self::with_config(player, config),
            Err(e) => Err(e),
        }
    }

    pub(crate) fn to_saved(&self) -> SavedQAgent {
        SavedQAgent {
            version: SavedQAgent::VERSION,
            player: self.player,
            q_table: self.q_table.clone(),
            epsilon: self.epsilon,
            epsilon_decay: self.epsilon_decay,
            min_epsilon: self.min_epsilon,
            rng_seed: self.rng_seed,
            stats: self.stats,
        }
    }

    pub(crate) fn from_saved(saved: SavedQAgent) -> Self {
        Self {
            player: saved.player,
            q_table: saved.q_table,
            epsilon: saved.epsilon,
            epsilon_decay: saved.epsilon_decay,
            min_epsilon: saved.min_epsilon,
            rng: build_rng(saved.rng_seed),
            rng_seed: saved.rng_seed,
            stats: saved.stats,
        }
    }
}

impl Agent for QLearningAgent {
    fn select_move(&mut self, state: &GameState) -> Result<Move> {
        self.get_best_move(state)
    }

    fn name(&self) -> &str {
        "q-learning"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        Ok(())
    }
}
