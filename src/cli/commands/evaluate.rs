//! Evaluate command - play two agents against each other

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::{
        config::AgentSpec,
        output::{format_rate, json_output_path, print_section, print_stats_table},
    },
    pipeline::{ComparisonFramework, DEFAULT_MAX_PLIES},
    ports::Agent,
    rules::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Play two agents against each other")]
pub struct EvaluateArgs {
    /// First agent (`alphabeta:3`, `q:model.msgpack`, ...)
    pub agent_a: AgentSpec,

    /// Second agent
    pub agent_b: AgentSpec,

    /// Number of games; seats alternate, `agent_a` opens the first
    #[arg(long, short = 'g', default_value_t = 10)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Plies after which a game is declared drawn
    #[arg(long, default_value_t = DEFAULT_MAX_PLIES)]
    pub max_plies: usize,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let app = App::new();
    let build = |spec: &AgentSpec, seat: Player, seed: Option<u64>| -> Result<Box<dyn Agent>> {
        app.create_agent(&spec.config_with_seed(seed), seat)
            .with_context(|| format!("Failed to build agent '{spec}'"))
    };
    let agents = vec![
        build(&args.agent_a, Player::One, args.seed)?,
        build(&args.agent_b, Player::Two, args.seed.map(|s| s.wrapping_add(1)))?,
    ];

    println!("Evaluating {} vs {} over {} games", args.agent_a, args.agent_b, args.games);
    let mut framework = ComparisonFramework::new(agents).with_max_plies(args.max_plies);
    let result = framework.compare_round_robin(args.games)?;

    print_section("Evaluation Results");
    if let Some(matchup) = result.matchups.first() {
        let games = matchup.games().max(1) as f64;
        print_stats_table(&[
            ("Games", matchup.games().to_string()),
            (
                "A wins",
                format!("{} ({})", matchup.a_wins, format_rate(matchup.a_wins as f64 / games)),
            ),
            ("Draws", format!("{} ({})", matchup.draws, format_rate(matchup.draws as f64 / games))),
            (
                "B wins",
                format!("{} ({})", matchup.b_wins, format_rate(matchup.b_wins as f64 / games)),
            ),
            ("Average plies", format!("{:.1}", matchup.total_plies as f64 / games)),
        ]);
    }

    if let Some(raw) = &args.export {
        let path = json_output_path(raw, "evaluation.json");
        result
            .save(&path)
            .with_context(|| format!("Failed to export results to {}", path.display()))?;
        println!("\nResults exported to {}", path.display());
    }

    Ok(())
}
