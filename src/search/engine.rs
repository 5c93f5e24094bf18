//! Recursive minimax and alpha-beta over a mutably borrowed state

use log::debug;
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::config::{SearchConfig, TieBreak};
use crate::{
    error::{Error, Result},
    evaluation::{Evaluator, LOSS_SCORE, MotifEvaluator, Score, WIN_SCORE},
    rules::{GameState, Move, Player},
};

/// Result of one root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Move,
    /// Exact minimax value of `best_move` from the searching player's view.
    pub value: Score,
    /// Positions visited, root included.
    pub nodes: u64,
}

/// Reusable move buffers, one per recursion level in practice.
#[derive(Default)]
struct MovePool {
    free: Vec<Vec<Move>>,
}

impl MovePool {
    fn alloc(&mut self) -> Vec<Move> {
        self.free.pop().unwrap_or_default()
    }

    fn release(&mut self, mut moves: Vec<Move>) {
        moves.clear();
        self.free.push(moves);
    }
}

pub struct SearchEngine {
    config: SearchConfig,
    evaluator: Box<dyn Evaluator>,
    motif: MotifEvaluator,
    rng: StdRng,
    move_pool: MovePool,
    nodes: u64,
}

impl SearchEngine {
    /// Build an engine, validating the configuration first.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Ok(SearchEngine {
            evaluator: config.evaluator.build(config.motif_weights),
            motif: MotifEvaluator::new(config.motif_weights),
            rng,
            move_pool: MovePool::default(),
            nodes: 0,
            config,
        })
    }

    /// Reseed the tie-break RNG.
    pub(crate) fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Search `state` and pick a move for its side to move, valued from
    /// `agent`'s perspective.
    ///
    /// The state is restored before returning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalMoves`] if the side to move has no action.
    pub fn search(&mut self, state: &mut GameState, agent: Player) -> Result<SearchOutcome> {
        self.nodes = 1;
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoLegalMoves);
        }
        let maximizing = state.to_move() == agent;
        let child_depth = self.config.depth - 1;

        let mut scored = Vec::with_capacity(moves.len());
        for mv in moves {
            let mut child = state.play(mv);
            let value = if self.config.pruning {
                self.alpha_beta(&mut child, child_depth, LOSS_SCORE, WIN_SCORE, !maximizing, agent)
            } else {
                self.minimax(&mut child, child_depth, !maximizing, agent)
            };
            scored.push((mv, value));
        }

        let values = scored.iter().map(|&(_, value)| value);
        let best_value = if maximizing { values.max() } else { values.min() }
            .ok_or(Error::NoLegalMoves)?;
        let tied: Vec<Move> = scored
            .iter()
            .filter(|&&(_, value)| value == best_value)
            .map(|&(mv, _)| mv)
            .collect();
        let decided = best_value == WIN_SCORE || best_value == LOSS_SCORE;
        let best_move = self.break_tie(state, &tied, decided)?;

        debug!(
            "{} depth {} searched {} nodes: {} valued {} ({} tied)",
            self.evaluator.name(),
            self.config.depth,
            self.nodes,
            best_move,
            best_value,
            tied.len()
        );
        Ok(SearchOutcome {
            best_move,
            value: best_value,
            nodes: self.nodes,
        })
    }

    /// Pick among equally valued root moves. Forced wins and forced losses
    /// (`decided`) are never re-ranked by shape.
    fn break_tie(&mut self, state: &mut GameState, tied: &[Move], decided: bool) -> Result<Move> {
        let first = *tied.first().ok_or(Error::NoLegalMoves)?;
        match self.config.tie_break {
            TieBreak::First => Ok(first),
            TieBreak::Random => Ok(*tied.choose(&mut self.rng).unwrap_or(&first)),
            TieBreak::Motif if decided => Ok(first),
            TieBreak::Motif => {
                let mover = state.to_move();
                let ranked: Vec<(Move, Score)> = tied
                    .iter()
                    .map(|&mv| {
                        let child = state.play(mv);
                        (mv, self.motif.evaluate(&child, mover))
                    })
                    .collect();
                let top = ranked.iter().map(|&(_, shape)| shape).max().unwrap_or(0);
                let best: Vec<Move> = ranked
                    .into_iter()
                    .filter(|&(_, shape)| shape == top)
                    .map(|(mv, _)| mv)
                    .collect();
                Ok(*best.choose(&mut self.rng).unwrap_or(&first))
            }
        }
    }

    /// Terminal value or horizon evaluation, if the node is a leaf.
    fn leaf_value(&self, state: &GameState, depth: usize, agent: Player) -> Option<Score> {
        if let Some(winner) = state.check_winner() {
            return Some(if winner == agent { WIN_SCORE } else { LOSS_SCORE });
        }
        (depth == 0).then(|| self.evaluator.evaluate(state, agent))
    }

    fn minimax(
        &mut self,
        state: &mut GameState,
        depth: usize,
        maximizing: bool,
        agent: Player,
    ) -> Score {
        self.nodes += 1;
        if let Some(value) = self.leaf_value(state, depth, agent) {
            return value;
        }
        let mut moves = self.move_pool.alloc();
        state.legal_moves_into(&mut moves);
        if moves.is_empty() {
            self.move_pool.release(moves);
            return self.evaluator.evaluate(state, agent);
        }

        let mut best = if maximizing { LOSS_SCORE } else { WIN_SCORE };
        for &mv in &moves {
            let mut child = state.play(mv);
            let value = self.minimax(&mut child, depth - 1, !maximizing, agent);
            best = if maximizing { best.max(value) } else { best.min(value) };
        }
        self.move_pool.release(moves);
        best
    }

    fn alpha_beta(
        &mut self,
        state: &mut GameState,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        agent: Player,
    ) -> Score {
        self.nodes += 1;
        if let Some(value) = self.leaf_value(state, depth, agent) {
            return value;
        }
        let mut moves = self.move_pool.alloc();
        state.legal_moves_into(&mut moves);
        if moves.is_empty() {
            self.move_pool.release(moves);
            return self.evaluator.evaluate(state, agent);
        }

        let mut best = if maximizing { LOSS_SCORE } else { WIN_SCORE };
        for &mv in &moves {
            let mut child = state.play(mv);
            let value = self.alpha_beta(&mut child, depth - 1, alpha, beta, !maximizing, agent);
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }
        self.move_pool.release(moves);
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Board;

    #[test]
    fn test_search_restores_state() {
        let mut state = GameState::new();
        state.apply(Move::place(2, 2).unwrap());
        let before = state;
        let mut engine = SearchEngine::new(SearchConfig::alpha_beta(2)).unwrap();
        engine.search(&mut state, Player::Two).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_takes_immediate_win() {
        // P1 to move with (0, 0) and (0, 2); the opponent pieces block both pushes
        // from (0, 1).
        let board = Board::parse(
            "1.12...2/......../......../......../......../......../......../........",
        )
        .unwrap();
        let mut state = GameState::from_parts(board, [2, 2], Player::One);
        let mut engine = SearchEngine::new(SearchConfig::minimax(1)).unwrap();
        let outcome = engine.search(&mut state, Player::One).unwrap();
        assert_eq!(outcome.best_move, Move::place(0, 1).unwrap());
        assert_eq!(outcome.value, WIN_SCORE);
    }

    #[test]
    fn test_motif_tie_break_skips_decided_values() {
        // P1 at (2, 2). Placing at (2, 4) keeps the pieces closer than (7, 7).
        let board = Board::parse(
            "......../......../..1...../......../......../......../......../........",
        )
        .unwrap();
        let mut state = GameState::from_parts(board, [1, 0], Player::One);
        let far = Move::place(7, 7).unwrap();
        let near = Move::place(2, 4).unwrap();
        let mut engine = SearchEngine::new(SearchConfig::hybrid(1).with_seed(1)).unwrap();

        assert_eq!(engine.break_tie(&mut state, &[far, near], false).unwrap(), near);
        assert_eq!(engine.break_tie(&mut state, &[far, near], true).unwrap(), far);
    }

    #[test]
    fn test_zero_depth_engine_is_rejected() {
        assert!(SearchEngine::new(SearchConfig::minimax(0)).is_err());
    }

    #[test]
    fn test_no_moves_is_an_error() {
        // Every square filled: no placement is possible.
        let board = Board::parse(&"12".repeat(32)).unwrap();
        let mut state = GameState::from_parts(board, [7, 7], Player::One);
        let mut engine = SearchEngine::new(SearchConfig::minimax(1)).unwrap();
        assert!(matches!(
            engine.search(&mut state, Player::One),
            Err(Error::NoLegalMoves)
        ));
    }
}
