//! Training pipeline for the Q-learning agent

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    adapters::MsgPackRepository,
    ports::{Agent, AgentRepository, Observer},
    q_learning::{QLearningAgent, SavedQAgent},
    rules::{Game, GameOutcome, GameState, Move},
};

/// Plies after which an undecided game is declared a draw.
pub const DEFAULT_MAX_PLIES: usize = 200;

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub num_episodes: usize,

    /// Seeds the learner and, offset by one, the opponent.
    pub seed: Option<u64>,

    pub max_plies: usize,

    /// Write a checkpoint every this many episodes.
    pub checkpoint_interval: Option<usize>,

    pub checkpoint_dir: PathBuf,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_episodes: 1000,
            seed: None,
            max_plies: DEFAULT_MAX_PLIES,
            checkpoint_interval: None,
            checkpoint_dir: PathBuf::from("saved_models"),
        }
    }
}

/// Result of a training run, from the learner's side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    pub total_episodes: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub avg_plies: f64,
    /// Distinct positions in the Q-table after training.
    pub q_states: usize,
    pub final_epsilon: f64,
    pub checkpoints: Vec<PathBuf>,
}

impl TrainingResult {
    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Trains a [`QLearningAgent`] against a fixed opponent.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
    repository: Box<dyn AgentRepository>,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            repository: Box::new(MsgPackRepository),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Store checkpoints somewhere other than MessagePack files.
    pub fn with_repository(mut self, repository: Box<dyn AgentRepository>) -> Self {
        self.repository = repository;
        self
    }

    pub fn checkpoint_path(&self, episode: usize) -> PathBuf {
        self.config
            .checkpoint_dir
            .join(format!("qagent_checkpoint_{episode}.msgpack"))
    }

    /// Play `num_episodes` games, learning after each.
    ///
    /// Player One always opens; the learner plays its own side.
    pub fn run(
        &mut self,
        agent: &mut QLearningAgent,
        opponent: &mut dyn Agent,
    ) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed)?;
            opponent.set_rng_seed(seed.wrapping_add(1))?;
        }
        info!(
            "training {} as {} against {} for {} episodes",
            agent.name(),
            agent.player(),
            opponent.name(),
            self.config.num_episodes
        );
        let started = Instant::now();

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        let (mut wins, mut draws, mut losses, mut total_plies) = (0, 0, 0, 0);
        let mut checkpoints = Vec::new();
        for episode in 0..self.config.num_episodes {
            let game = self.play_episode(episode, agent, opponent)?;
            let outcome = game.outcome().unwrap_or(GameOutcome::Draw);
            match outcome {
                GameOutcome::Win(winner) if winner == agent.player() => wins += 1,
                GameOutcome::Win(_) => losses += 1,
                GameOutcome::Draw => draws += 1,
            }
            total_plies += game.ply();

            for observer in &mut self.observers {
                observer.on_episode_end(episode, outcome, game.ply())?;
            }

            if let Some(interval) = self.config.checkpoint_interval.filter(|&n| n > 0) {
                if (episode + 1).is_multiple_of(interval) {
                    checkpoints.push(self.checkpoint(episode, agent)?);
                }
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }
        agent.add_training_time(started.elapsed().as_secs_f64());

        let total = self.config.num_episodes;
        let rate = |n: usize| if total == 0 { 0.0 } else { n as f64 / total as f64 };
        let result = TrainingResult {
            total_episodes: total,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
            avg_plies: rate(total_plies),
            q_states: agent.q_table().state_count(),
            final_epsilon: agent.epsilon(),
            checkpoints,
        };
        info!(
            "training finished: {wins} wins, {draws} draws, {losses} losses, {} positions learned",
            result.q_states
        );
        Ok(result)
    }

    fn play_episode(
        &mut self,
        episode: usize,
        agent: &mut QLearningAgent,
        opponent: &mut dyn Agent,
    ) -> Result<Game> {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let mut game = Game::new();
        let mut history: Vec<(GameState, Move)> = Vec::new();
        while !game.is_over() {
            if game.ply() >= self.config.max_plies {
                warn!(
                    "episode {episode} reached {} plies, declaring a draw",
                    self.config.max_plies
                );
                game.declare_draw();
                break;
            }
            let state = *game.current_state();
            let mv = if state.to_move() == agent.player() {
                let mv = agent.choose_action(&state, true)?;
                history.push((state, mv));
                mv
            } else {
                opponent.select_move(&state)?
            };
            for observer in &mut self.observers {
                observer.on_move(episode, game.ply(), &state, mv)?;
            }
            game.play(mv)?;
        }

        agent.learn_episode(&history, game.current_state());
        agent.record_outcome(game.outcome().unwrap_or(GameOutcome::Draw));
        Ok(game)
    }

    fn checkpoint(&mut self, episode: usize, agent: &QLearningAgent) -> Result<PathBuf> {
        let path = self.checkpoint_path(episode + 1);
        self.repository.save(&SavedQAgent::from_agent(agent), &path)?;
        info!("checkpoint after episode {} written to {}", episode + 1, path.display());
        for observer in &mut self.observers {
            observer.on_checkpoint(episode, &path)?;
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::InMemoryRepository, pipeline::comparison::RandomAgent, rules::Player};

    #[test]
    fn test_training_pipeline_counts_every_episode() {
        let config = TrainingConfig {
            num_episodes: 6,
            seed: Some(42),
            max_plies: 60,
            ..TrainingConfig::default()
        };
        let mut pipeline = TrainingPipeline::new(config);
        let mut agent = QLearningAgent::new(Player::One);
        let mut opponent = RandomAgent::new("random");

        let result = pipeline.run(&mut agent, &mut opponent).unwrap();

        assert_eq!(result.total_episodes, 6);
        assert_eq!(result.wins + result.draws + result.losses, 6);
        assert_eq!(agent.stats().episodes_trained, 6);
        assert!(result.q_states > 0);
        assert!(result.checkpoints.is_empty());
    }

    #[test]
    fn test_checkpoints_go_through_repository() {
        let repo = InMemoryRepository::new();
        let config = TrainingConfig {
            num_episodes: 4,
            seed: Some(1),
            max_plies: 30,
            checkpoint_interval: Some(2),
            checkpoint_dir: PathBuf::from("ckpt"),
        };
        let mut pipeline = TrainingPipeline::new(config).with_repository(Box::new(repo.clone()));
        let mut agent = QLearningAgent::new(Player::Two);
        let mut opponent = RandomAgent::new("random");

        let result = pipeline.run(&mut agent, &mut opponent).unwrap();

        assert_eq!(result.checkpoints.len(), 2);
        assert!(repo.contains(&PathBuf::from("ckpt").join("qagent_checkpoint_2.msgpack")));
        assert!(repo.contains(&PathBuf::from("ckpt").join("qagent_checkpoint_4.msgpack")));
        let saved = repo.load(&result.checkpoints[1]).unwrap();
        assert_eq!(saved.stats.episodes_trained, 4);
    }
}
