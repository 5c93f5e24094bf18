//! Observer implementations for training pipelines

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::Observer,
    rules::{GameOutcome, GameState, Move, Player},
};

/// Tally of outcomes from one player's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    wins: usize,
    draws: usize,
    losses: usize,
}

impl Tally {
    fn record(&mut self, outcome: GameOutcome, player: Player) {
        match outcome {
            GameOutcome::Win(winner) if winner == player => self.wins += 1,
            GameOutcome::Win(_) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    fn total(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            count as f64 / self.total() as f64
        }
    }
}

/// Progress bar observer - shows training progress with a W/D/L tally
pub struct ProgressObserver {
    player: Player,
    progress_bar: Option<ProgressBar>,
    tally: Tally,
}

impl ProgressObserver {
    /// Count outcomes from `player`'s side.
    pub fn new(player: Player) -> Self {
        Self {
            player,
            progress_bar: None,
            tally: Tally::default(),
        }
    }

    fn message(&self) -> String {
        format!("{} D:{} L:{}", self.tally.wins, self.tally.draws, self.tally.losses)
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (W:{msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        outcome: GameOutcome,
        _plies: usize,
    ) -> Result<()> {
        self.tally.record(outcome, self.player);
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - outcome rates and game lengths
pub struct MetricsObserver {
    player: Player,
    tally: Tally,
    game_lengths: Vec<usize>,
}

impl MetricsObserver {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            tally: Tally::default(),
            game_lengths: Vec::new(),
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.tally.rate(self.tally.wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.tally.rate(self.tally.draws)
    }

    pub fn loss_rate(&self) -> f64 {
        self.tally.rate(self.tally.losses)
    }

    /// Mean plies per finished game.
    pub fn avg_game_length(&self) -> f64 {
        if self.game_lengths.is_empty() {
            0.0
        } else {
            self.game_lengths.iter().sum::<usize>() as f64 / self.game_lengths.len() as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.tally.total(),
            wins: self.tally.wins,
            draws: self.tally.draws,
            losses: self.tally.losses,
            win_rate: self.win_rate(),
            draw_rate: self.draw_rate(),
            loss_rate: self.loss_rate(),
            avg_game_length: self.avg_game_length(),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub avg_game_length: f64,
}

impl Observer for MetricsObserver {
    fn on_episode_end(
        &mut self,
        _episode: usize,
        outcome: GameOutcome,
        plies: usize,
    ) -> Result<()> {
        self.tally.record(outcome, self.player);
        self.game_lengths.push(plies);
        Ok(())
    }
}

/// One finished episode as written by [`JsonlObserver`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    pub outcome: GameOutcome,
    pub plies: usize,
    pub moves: Vec<Move>,
}

/// JSONL observer - one line per episode with its move list
pub struct JsonlObserver {
    writer: BufWriter<File>,
    moves: Vec<Move>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
            moves: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.moves.clear();
        Ok(())
    }

    fn on_move(
        &mut self,
        _episode: usize,
        _ply: usize,
        _state: &GameState,
        mv: Move,
    ) -> Result<()> {
        self.moves.push(mv);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome, plies: usize) -> Result<()> {
        let record = EpisodeRecord {
            episode,
            outcome,
            plies,
            moves: std::mem::take(&mut self.moves),
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
