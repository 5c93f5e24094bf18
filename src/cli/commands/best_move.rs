//! Best-move command - answer one turn for a judge-style snapshot

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::config::AgentSpec,
    ports::Agent,
    rules::{ExternalState, GameState, Move},
};

#[derive(Parser, Debug)]
#[command(about = "Print the chosen move for a board snapshot")]
pub struct BestMoveArgs {
    /// Snapshot JSON file; reads stdin when absent or `-`
    pub input: Option<PathBuf>,

    /// Agent that chooses the move
    #[arg(long, short = 'a', default_value = "hybrid:2")]
    pub agent: AgentSpec,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

fn read_snapshot(input: Option<&PathBuf>) -> Result<ExternalState> {
    let snapshot = match input.filter(|p| p.as_os_str() != "-") {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open snapshot {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse snapshot {}", path.display()))?
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read snapshot from stdin")?;
            serde_json::from_str(&text).context("Failed to parse snapshot from stdin")?
        }
    };
    Ok(snapshot)
}

/// Decode `snapshot` and ask the configured agent for a move.
pub fn choose(snapshot: &ExternalState, spec: &AgentSpec, seed: Option<u64>) -> Result<Move> {
    let state = GameState::from_external(snapshot)?;
    let mut agent = App::new()
        .create_agent(&spec.config_with_seed(seed), state.to_move())
        .with_context(|| format!("Failed to build agent '{spec}'"))?;
    Ok(agent.select_move(&state)?)
}

pub fn execute(args: BestMoveArgs) -> Result<()> {
    let snapshot = read_snapshot(args.input.as_ref())?;
    let mv = choose(&snapshot, &args.agent, args.seed)?;
    println!("{}", serde_json::to_string(&mv)?);
    Ok(())
}
