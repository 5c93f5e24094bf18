//! Shared helpers for the push-battle test suite.
//!
//! Seeded random playouts give reproducible positions in both phases.

#![allow(dead_code)]

use push_battle::rules::{Board, GameState, Move, Player, Square};
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

/// Play up to `plies` uniformly random legal moves from the opening,
/// stopping early at a decided position.
pub fn random_playout(seed: u64, plies: usize) -> (GameState, Vec<Move>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = GameState::new();
    let mut played = Vec::with_capacity(plies);
    for _ in 0..plies {
        if state.is_terminal() {
            break;
        }
        let moves = state.legal_moves();
        let Some(&mv) = moves.choose(&mut rng) else {
            break;
        };
        state.try_apply(mv).unwrap();
        played.push(mv);
    }
    (state, played)
}

pub fn sq(row: usize, col: usize) -> Square {
    Square::new(row, col).unwrap()
}

/// Position from a `/`-separated board drawing.
pub fn position(rows: &str, placed: [u8; 2], to_move: Player) -> GameState {
    GameState::from_parts(Board::parse(rows).unwrap(), placed, to_move)
}
