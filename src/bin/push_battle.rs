//! Push Battle CLI - train, evaluate, and query agents for the toroidal push game

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "push-battle")]
#[command(version, about = "Search and learning agents for Push Battle", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning agent against a baseline
    Train(Box<push_battle::cli::commands::train::TrainArgs>),

    /// Play two agents against each other
    Evaluate(push_battle::cli::commands::evaluate::EvaluateArgs),

    /// Print the chosen move for a board snapshot
    BestMove(push_battle::cli::commands::best_move::BestMoveArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => push_battle::cli::commands::train::execute(*args),
        Commands::Evaluate(args) => push_battle::cli::commands::evaluate::execute(args),
        Commands::BestMove(args) => push_battle::cli::commands::best_move::execute(args),
    }
}
