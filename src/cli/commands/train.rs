//! Train command - train a Q-learning agent against a baseline

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    app::App,
    cli::{
        config::{AgentSpec, parse_player_token},
        output::{format_rate, json_output_path, print_section, print_stats_table},
    },
    pipeline::{
        DEFAULT_MAX_PLIES, JsonlObserver, ProgressObserver, TrainingConfig, TrainingPipeline,
        TrainingResult,
    },
    q_learning::{QLearningAgent, QLearningConfig, TrainingStats},
    rules::Player,
};

#[derive(Debug, Serialize)]
struct AgentSummary {
    player: Player,
    opponent: String,
    seed: Option<u64>,
    model: Option<PathBuf>,
    q_states: usize,
    q_entries: usize,
    lifetime: TrainingStats,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    agent: AgentSummary,
    config: TrainingConfig,
}

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Opponent to train against (`random`, `alphabeta:2`, `q:path`, ...)
    #[arg(long, short = 'o', default_value = "random")]
    pub opponent: AgentSpec,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 1000)]
    pub episodes: usize,

    /// Model file; loaded if it exists, written after training
    #[arg(long, short = 'm')]
    pub model: Option<PathBuf>,

    /// Side the learner plays (`p1` or `p2`)
    #[arg(long, default_value = "p1")]
    pub player: String,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Plies after which a game is declared drawn
    #[arg(long, default_value_t = DEFAULT_MAX_PLIES)]
    pub max_plies: usize,

    /// Write a checkpoint every N episodes
    #[arg(long)]
    pub checkpoint_every: Option<usize>,

    #[arg(long, default_value = "saved_models")]
    pub checkpoint_dir: PathBuf,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional file for JSONL episode records
    #[arg(long)]
    pub observations: Option<PathBuf>,

    #[arg(long, default_value_t = 0.1)]
    pub learning_rate: f64,

    #[arg(long, default_value_t = 0.9)]
    pub discount_factor: f64,

    /// Initial exploration rate
    #[arg(long, default_value_t = 0.1)]
    pub epsilon: f64,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let player = parse_player_token(&args.player, "--player")?;
    let q_config = QLearningConfig {
        learning_rate: args.learning_rate,
        discount_factor: args.discount_factor,
        epsilon: args.epsilon,
        seed: args.seed,
        ..QLearningConfig::default()
    };

    let mut agent = match &args.model {
        Some(path) => QLearningAgent::load_or_new(path, player, q_config)
            .with_context(|| format!("Failed to load model {}", path.display()))?,
        None => QLearningAgent::with_config(player, q_config)?,
    };
    if agent.player() != player {
        println!("Model plays {}, ignoring --player {}", agent.player(), args.player);
    }

    let app = App::new();
    let opponent_config = args.opponent.config_with_seed(args.seed.map(|s| s.wrapping_add(1)));
    let mut opponent = app
        .create_agent(&opponent_config, agent.player().opponent())
        .with_context(|| format!("Failed to build opponent '{}'", args.opponent))?;

    let config = TrainingConfig {
        num_episodes: args.episodes,
        seed: args.seed,
        max_plies: args.max_plies,
        checkpoint_interval: args.checkpoint_every,
        checkpoint_dir: args.checkpoint_dir.clone(),
    };
    let mut pipeline = TrainingPipeline::new(config.clone());
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new(agent.player())));
    }
    if let Some(path) = &args.observations {
        pipeline = pipeline.with_observer(Box::new(JsonlObserver::new(path)?));
    }

    let result = pipeline.run(&mut agent, opponent.as_mut())?;

    print_section("Training Results");
    print_stats_table(&[
        ("Episodes", result.total_episodes.to_string()),
        ("Wins", format!("{} ({})", result.wins, format_rate(result.win_rate))),
        ("Draws", format!("{} ({})", result.draws, format_rate(result.draw_rate))),
        ("Losses", format!("{} ({})", result.losses, format_rate(result.loss_rate))),
        ("Average plies", format!("{:.1}", result.avg_plies)),
        ("Positions learned", result.q_states.to_string()),
        ("Final epsilon", format!("{:.4}", result.final_epsilon)),
    ]);

    if let Some(path) = &args.model {
        agent
            .save(path)
            .with_context(|| format!("Failed to save model {}", path.display()))?;
        println!("\nModel saved to {}", path.display());
    }

    if let Some(raw) = &args.summary {
        let path = json_output_path(raw, "training_summary.json");
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let summary = TrainingSummaryFile {
            agent: AgentSummary {
                player: agent.player(),
                opponent: args.opponent.to_string(),
                seed: args.seed,
                model: args.model.clone(),
                q_states: agent.q_table().state_count(),
                q_entries: agent.q_table().size(),
                lifetime: *agent.stats(),
            },
            training: result,
            config,
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create summary {}", path.display()))?;
        to_writer_pretty(file, &summary)?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}
