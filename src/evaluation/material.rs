//! Piece count plus centre control

use super::{Evaluator, Score};
use crate::rules::{Board, GameState, Player, Square};

/// Cells within this Chebyshev distance of [`CENTRE`] count double.
const CENTRE_RADIUS: usize = 1;

const CENTRE: (usize, usize) = (4, 4);

const CENTRE_WEIGHT: Score = 2;
const EDGE_WEIGHT: Score = 1;

/// Placed-piece difference plus a positional term favouring the centre.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    fn cell_weight(square: Square) -> Score {
        let near_centre = square.row().abs_diff(CENTRE.0) <= CENTRE_RADIUS
            && square.col().abs_diff(CENTRE.1) <= CENTRE_RADIUS;
        if near_centre { CENTRE_WEIGHT } else { EDGE_WEIGHT }
    }

    fn positional(board: &Board, perspective: Player) -> Score {
        Square::all()
            .filter_map(|sq| board.get(sq).owner().map(|owner| (sq, owner)))
            .map(|(sq, owner)| {
                let weight = Self::cell_weight(sq);
                if owner == perspective { weight } else { -weight }
            })
            .sum()
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, state: &GameState, perspective: Player) -> Score {
        let material =
            state.placed(perspective) as Score - state.placed(perspective.opponent()) as Score;
        material + Self::positional(state.board(), perspective)
    }

    fn name(&self) -> &str {
        "material"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Move;

    #[test]
    fn test_empty_board_is_balanced() {
        let state = GameState::new();
        assert_eq!(MaterialEvaluator.evaluate(&state, Player::One), 0);
    }

    #[test]
    fn test_centre_piece_counts_double() {
        let mut state = GameState::new();
        state.apply(Move::place(4, 5).unwrap());
        // One placed plus a centre weight of two.
        assert_eq!(MaterialEvaluator.evaluate(&state, Player::One), 3);
        assert_eq!(MaterialEvaluator.evaluate(&state, Player::Two), -3);

        let mut state = GameState::new();
        state.apply(Move::place(0, 0).unwrap());
        assert_eq!(MaterialEvaluator.evaluate(&state, Player::One), 2);
    }

    #[test]
    fn test_centre_is_not_toroidal() {
        assert_eq!(MaterialEvaluator::cell_weight(Square::new(3, 3).unwrap()), CENTRE_WEIGHT);
        assert_eq!(MaterialEvaluator::cell_weight(Square::new(5, 5).unwrap()), CENTRE_WEIGHT);
        assert_eq!(MaterialEvaluator::cell_weight(Square::new(2, 4).unwrap()), EDGE_WEIGHT);
    }
}
