//! Moves, their wire encoding, and legal move generation

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    board::{NUM_PIECES, Square},
    state::GameState,
};
use crate::error::{Error, Result};

/// An action: a placement during the placement phase, a relocation afterwards.
///
/// Serialises as the judge's wire list: `[row, col]` or
/// `[src_row, src_col, dst_row, dst_col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub enum Move {
    Place { to: Square },
    Shift { from: Square, to: Square },
}

impl Move {
    pub fn place(row: usize, col: usize) -> Option<Move> {
        Square::new(row, col).map(|to| Move::Place { to })
    }

    pub fn shift(from: (usize, usize), to: (usize, usize)) -> Option<Move> {
        Some(Move::Shift {
            from: Square::new(from.0, from.1)?,
            to: Square::new(to.0, to.1)?,
        })
    }

    /// The square the moving piece lands on.
    pub fn destination(self) -> Square {
        match self {
            Move::Place { to } | Move::Shift { to, .. } => to,
        }
    }

    pub fn is_placement(self) -> bool {
        matches!(self, Move::Place { .. })
    }

    pub fn to_wire(self) -> Vec<usize> {
        match self {
            Move::Place { to } => vec![to.row(), to.col()],
            Move::Shift { from, to } => vec![from.row(), from.col(), to.row(), to.col()],
        }
    }

    /// Decode a wire list of 2 or 4 integers.
    pub fn from_wire(encoding: &[i64]) -> Result<Move> {
        let invalid = |message: &str| Error::InvalidWire {
            encoding: encoding.to_vec(),
            message: message.to_string(),
        };
        let coords = encoding
            .iter()
            .map(|&v| usize::try_from(v).map_err(|_| invalid("negative coordinate")))
            .collect::<Result<Vec<usize>>>()?;
        match coords.as_slice() {
            &[r, c] => Move::place(r, c).ok_or_else(|| invalid("coordinate out of range")),
            &[r0, c0, r1, c1] => {
                Move::shift((r0, c0), (r1, c1)).ok_or_else(|| invalid("coordinate out of range"))
            }
            _ => Err(invalid("expected 2 or 4 integers")),
        }
    }
}

impl From<Move> for Vec<usize> {
    fn from(mv: Move) -> Self {
        mv.to_wire()
    }
}

impl TryFrom<Vec<usize>> for Move {
    type Error = Error;

    fn try_from(value: Vec<usize>) -> Result<Self> {
        let encoding: Vec<i64> = value.iter().map(|&v| v as i64).collect();
        Move::from_wire(&encoding)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place { to } => write!(f, "place {to}"),
            Move::Shift { from, to } => write!(f, "move {from} -> {to}"),
        }
    }
}

/// Legal moves for the side to move, row-major.
///
/// Placement phase: every empty square. Movement phase: every (own piece,
/// empty square) pair, ordered by source then destination.
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    let mut moves = Vec::new();
    legal_moves_into(state, &mut moves);
    moves
}

/// Same as [`legal_moves`] but reuses `moves` as the output buffer.
pub fn legal_moves_into(state: &GameState, moves: &mut Vec<Move>) {
    moves.clear();
    let player = state.to_move();
    let board = state.board();
    if state.placed(player) < NUM_PIECES {
        moves.extend(board.empty_squares().map(|to| Move::Place { to }));
    } else {
        let empties: Vec<Square> = board.empty_squares().collect();
        for from in board.squares_of(player) {
            moves.extend(empties.iter().map(|&to| Move::Shift { from, to }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_roundtrip() {
        let place = Move::place(3, 7).unwrap();
        assert_eq!(place.to_wire(), vec![3, 7]);
        assert_eq!(Move::from_wire(&[3, 7]).unwrap(), place);

        let shift = Move::shift((0, 1), (7, 2)).unwrap();
        assert_eq!(serde_json::to_string(&shift).unwrap(), "[0,1,7,2]");
        let parsed: Move = serde_json::from_str("[0,1,7,2]").unwrap();
        assert_eq!(parsed, shift);
    }

    #[test]
    fn test_wire_rejects_bad_lengths_and_ranges() {
        assert!(Move::from_wire(&[1, 2, 3]).is_err());
        assert!(Move::from_wire(&[8, 0]).is_err());
        assert!(Move::from_wire(&[-1, 0]).is_err());
        assert!(serde_json::from_str::<Move>("[1]").is_err());
    }

    #[test]
    fn test_empty_board_has_sixty_four_placements() {
        let state = GameState::new();
        let moves = legal_moves(&state);
        assert_eq!(moves.len(), 64);
        assert_eq!(moves[0], Move::place(0, 0).unwrap());
        assert_eq!(moves[63], Move::place(7, 7).unwrap());
    }
}
