//! Search-backed player

use super::{
    config::SearchConfig,
    engine::{SearchEngine, SearchOutcome},
};
use crate::{
    error::Result,
    ports::Agent,
    rules::{GameState, Move, Player},
};

/// A player that picks moves with a [`SearchEngine`].
pub struct SearchAgent {
    player: Player,
    engine: SearchEngine,
    name: String,
}

impl SearchAgent {
    pub fn new(player: Player, config: SearchConfig) -> Result<Self> {
        let name = match (config.pruning, config.tie_break) {
            (false, _) => format!("minimax-d{}", config.depth),
            (true, super::TieBreak::Motif) => format!("hybrid-d{}", config.depth),
            (true, _) => format!("alphabeta-d{}", config.depth),
        };
        Ok(SearchAgent {
            player,
            engine: SearchEngine::new(config)?,
            name,
        })
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Best move for the side to move, valued from this agent's perspective.
    ///
    /// `state` is borrowed exclusively for the search and returned unchanged.
    pub fn get_best_move(&mut self, state: &mut GameState) -> Result<Move> {
        self.search(state).map(|outcome| outcome.best_move)
    }

    /// Like [`Self::get_best_move`] but also reports the value and node count.
    pub fn search(&mut self, state: &mut GameState) -> Result<SearchOutcome> {
        self.engine.search(state, self.player)
    }
}

/// As an [`Agent`] the engine plays whichever side is to move, so one agent
/// can take either seat in a match.
impl Agent for SearchAgent {
    fn select_move(&mut self, state: &GameState) -> Result<Move> {
        let mut scratch = *state;
        let mover = scratch.to_move();
        self.engine
            .search(&mut scratch, mover)
            .map(|outcome| outcome.best_move)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.engine.reseed(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_names_follow_variant() {
        let agent = SearchAgent::new(Player::One, SearchConfig::hybrid(2)).unwrap();
        assert_eq!(agent.name(), "hybrid-d2");
        let agent = SearchAgent::new(Player::One, SearchConfig::minimax(1)).unwrap();
        assert_eq!(agent.name(), "minimax-d1");
    }

    #[test]
    fn test_selected_move_is_legal() {
        let config = SearchConfig::alpha_beta(1).with_seed(3);
        let mut agent = SearchAgent::new(Player::Two, config).unwrap();
        let mut state = GameState::new();
        state.apply(Move::place(4, 4).unwrap());
        let mv = agent.select_move(&state).unwrap();
        assert!(state.legal_moves().contains(&mv));
    }
}
