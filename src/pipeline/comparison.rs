//! Matches between agents and the random baseline

use log::warn;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::Agent,
    rules::{Game, GameOutcome, GameState, Move, Player},
};

/// Uniformly random legal moves (baseline)
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Create a random agent with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, state: &GameState) -> Result<Move> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoLegalMoves);
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves[index])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Play one game from the empty board, `first` moving first.
///
/// A game still undecided after `max_plies` plies is declared a draw.
pub fn play_match(first: &mut dyn Agent, second: &mut dyn Agent, max_plies: usize) -> Result<Game> {
    let mut game = Game::new();
    while !game.is_over() {
        if game.ply() >= max_plies {
            warn!(
                "{} vs {} reached {max_plies} plies, declaring a draw",
                first.name(),
                second.name()
            );
            game.declare_draw();
            break;
        }
        let state = *game.current_state();
        let mover: &mut dyn Agent = match state.to_move() {
            Player::One => &mut *first,
            Player::Two => &mut *second,
        };
        let mv = mover.select_move(&state)?;
        game.play(mv)?;
    }
    Ok(game)
}

/// Head-to-head tally between two agents, indexed into
/// [`ComparisonResult::agents`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchupResult {
    pub agent_a: usize,
    pub agent_b: usize,
    pub a_wins: usize,
    pub draws: usize,
    pub b_wins: usize,
    /// Games where `agent_a` moved first.
    pub a_first: usize,
    pub total_plies: usize,
}

impl MatchupResult {
    pub fn games(&self) -> usize {
        self.a_wins + self.draws + self.b_wins
    }
}

/// Result of comparing several agents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub agents: Vec<String>,
    pub matchups: Vec<MatchupResult>,
    pub total_games: usize,
}

impl ComparisonResult {
    pub fn new(agents: Vec<String>) -> Self {
        Self {
            agents,
            matchups: Vec::new(),
            total_games: 0,
        }
    }

    /// Share of games won by the agent at `idx` across all its matchups.
    pub fn win_rate(&self, idx: usize) -> f64 {
        let (wins, total) = self
            .matchups
            .iter()
            .fold((0, 0), |(wins, total), m| {
                if m.agent_a == idx {
                    (wins + m.a_wins, total + m.games())
                } else if m.agent_b == idx {
                    (wins + m.b_wins, total + m.games())
                } else {
                    (wins, total)
                }
            });
        if total == 0 {
            0.0
        } else {
            wins as f64 / total as f64
        }
    }

    /// Save result to a JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Round-robin comparison with alternating seats
pub struct ComparisonFramework {
    agents: Vec<Box<dyn Agent>>,
    max_plies: usize,
}

impl ComparisonFramework {
    pub fn new(agents: Vec<Box<dyn Agent>>) -> Self {
        Self {
            agents,
            max_plies: super::training::DEFAULT_MAX_PLIES,
        }
    }

    pub fn with_max_plies(mut self, max_plies: usize) -> Self {
        self.max_plies = max_plies;
        self
    }

    /// Play every pair `games_per_matchup` times, swapping who opens each game.
    pub fn compare_round_robin(&mut self, games_per_matchup: usize) -> Result<ComparisonResult> {
        let names = self.agents.iter().map(|a| a.name().to_string()).collect();
        let mut result = ComparisonResult::new(names);

        for i in 0..self.agents.len() {
            for j in (i + 1)..self.agents.len() {
                let mut matchup = MatchupResult {
                    agent_a: i,
                    agent_b: j,
                    ..MatchupResult::default()
                };
                for game_idx in 0..games_per_matchup {
                    let a_first = game_idx.is_multiple_of(2);
                    let (first, second) = if a_first { (i, j) } else { (j, i) };
                    let game = self.play_game(first, second)?;
                    let a_seat = if a_first { Player::One } else { Player::Two };
                    match game.outcome().unwrap_or(GameOutcome::Draw) {
                        GameOutcome::Win(winner) if winner == a_seat => matchup.a_wins += 1,
                        GameOutcome::Win(_) => matchup.b_wins += 1,
                        GameOutcome::Draw => matchup.draws += 1,
                    }
                    if a_first {
                        matchup.a_first += 1;
                    }
                    matchup.total_plies += game.ply();
                    result.total_games += 1;
                }
                result.matchups.push(matchup);
            }
        }

        Ok(result)
    }

    fn play_game(&mut self, first: usize, second: usize) -> Result<Game> {
        let (low, high) = (first.min(second), first.max(second));
        let (head, tail) = self.agents.split_at_mut(high);
        let (low_agent, high_agent) = (&mut head[low], &mut tail[0]);
        if first == low {
            play_match(low_agent.as_mut(), high_agent.as_mut(), self.max_plies)
        } else {
            play_match(high_agent.as_mut(), low_agent.as_mut(), self.max_plies)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_agent_plays_legal_moves() {
        let mut agent = RandomAgent::with_seed("random", 1);
        let state = GameState::new();
        let mv = agent.select_move(&state).expect("random agent should supply a move");
        assert!(state.legal_moves().contains(&mv));
    }

    #[test]
    fn test_play_match_respects_ply_limit() {
        let mut a = RandomAgent::with_seed("a", 1);
        let mut b = RandomAgent::with_seed("b", 2);
        let game = play_match(&mut a, &mut b, 6).unwrap();
        assert!(game.ply() <= 6);
        assert!(game.is_over());
    }

    #[test]
    fn test_round_robin_alternates_seats() {
        let agents: Vec<Box<dyn Agent>> = vec![
            Box::new(RandomAgent::with_seed("a", 3)),
            Box::new(RandomAgent::with_seed("b", 4)),
            Box::new(RandomAgent::with_seed("c", 5)),
        ];
        let mut framework = ComparisonFramework::new(agents).with_max_plies(40);
        let result = framework.compare_round_robin(4).unwrap();

        assert_eq!(result.total_games, 12);
        assert_eq!(result.matchups.len(), 3);
        for matchup in &result.matchups {
            assert_eq!(matchup.games(), 4);
            assert_eq!(matchup.a_first, 2);
        }
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"agents\":[\"a\",\"b\",\"c\"]"));
    }
}
