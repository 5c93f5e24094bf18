//! Shape heuristic: adjacent pairs, open triangles, and spread

use serde::{Deserialize, Serialize};

use super::{Evaluator, Score};
use crate::rules::{BOARD_SIZE, Board, GameState, Player, Square};

/// Forward neighbours checked for pairs. Each adjacent pair is seen once per
/// orientation from the piece it starts at.
const PAIR_OFFSETS: [(i32, i32); 4] = [(-1, 1), (0, 1), (1, 1), (1, 0)];

/// Two-step arms forming a right-angle triangle around a piece.
const TRIANGLE_ARMS: [[(i32, i32); 2]; 4] = [
    [(-2, 0), (0, 2)],
    [(0, 2), (2, 0)],
    [(2, 0), (0, -2)],
    [(0, -2), (-2, 0)],
];

/// Largest toroidal Chebyshev distance on the board, used when a player has
/// fewer than two pieces.
const MAX_DISTANCE: usize = BOARD_SIZE / 2;

/// Weights applied to the three motif counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotifWeights {
    pub pair: Score,
    pub triangle: Score,
    pub spread: Score,
}

impl MotifWeights {
    /// Pairs and triangles only, spread ignored.
    pub fn basic() -> Self {
        MotifWeights {
            pair: 3,
            triangle: 1,
            spread: 0,
        }
    }
}

impl Default for MotifWeights {
    fn default() -> Self {
        MotifWeights {
            pair: 9,
            triangle: 3,
            spread: 1,
        }
    }
}

/// Raw motif counts for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotifCounts {
    pub pairs: usize,
    pub triangles: usize,
    pub min_distance: usize,
}

impl MotifCounts {
    pub fn of(board: &Board, player: Player) -> Self {
        let cell = player.to_cell();
        let pieces: Vec<Square> = board.squares_of(player).collect();
        let owned = |sq: Square, (dr, dc): (i32, i32)| board.get(sq.offset(dr, dc)) == cell;

        let mut counts = MotifCounts {
            min_distance: MAX_DISTANCE,
            ..MotifCounts::default()
        };
        for (i, &piece) in pieces.iter().enumerate() {
            counts.pairs += PAIR_OFFSETS.iter().filter(|&&d| owned(piece, d)).count();
            counts.triangles += TRIANGLE_ARMS
                .iter()
                .filter(|arms| arms.iter().all(|&d| owned(piece, d)))
                .count();
            for &other in &pieces[i + 1..] {
                counts.min_distance = counts.min_distance.min(piece.distance(other));
            }
        }
        counts
    }

    fn score(&self, weights: MotifWeights) -> Score {
        weights.pair * self.pairs as Score + weights.triangle * self.triangles as Score
            - weights.spread * self.min_distance as Score
    }
}

/// Difference of weighted motif scores between the two players.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotifEvaluator {
    weights: MotifWeights,
}

impl MotifEvaluator {
    pub fn new(weights: MotifWeights) -> Self {
        MotifEvaluator { weights }
    }
}

impl Evaluator for MotifEvaluator {
    fn evaluate(&self, state: &GameState, perspective: Player) -> Score {
        let board = state.board();
        MotifCounts::of(board, perspective).score(self.weights)
            - MotifCounts::of(board, perspective.opponent()).score(self.weights)
    }

    fn name(&self) -> &str {
        "motif"
    }
}
