//! Game state, the push rule, and make/undo

use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{
    board::{BOARD_SIZE, Board, Cell, DIRECTIONS, NUM_PIECES, Player, Square},
    lines::has_line,
    moves::{Move, legal_moves, legal_moves_into},
};
use crate::{
    error::{Error, Result},
    types::StateKey,
};

/// A player who finished placing but has fewer pieces than this on the board loses.
pub const MIN_VIABLE_PIECES: usize = 3;

/// Upper bound on cells touched by one action: source, destination, and two
/// cells per push direction.
const MAX_CHANGES: usize = 2 + 2 * DIRECTIONS.len();

/// Cells touched by one action with their previous contents, in the order
/// they were changed.
pub type Changes = SmallVec<[(Square, Cell); MAX_CHANGES]>;

/// Everything needed to reverse one `place` or `move_piece`.
#[derive(Debug, Clone)]
pub struct Undo {
    changes: Changes,
    placed: bool,
    mover: Player,
}

impl Undo {
    /// Pieces displaced by the push effect as `(from, to)` pairs.
    pub fn pushes(&self) -> Vec<(Square, Square)> {
        let skip = if self.placed { 1 } else { 2 };
        self.changes[skip..]
            .chunks_exact(2)
            .map(|pair| (pair[1].0, pair[0].0))
            .collect()
    }
}

/// Complete game state: board, pieces placed per player, side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    placed: [u8; 2],
    to_move: Player,
}

/// Snapshot in the judge's format: cells as 0 / 1 / -1, player as 1 / -1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalState {
    pub board: Vec<Vec<i8>>,
    pub current_player: i8,
    pub p1_pieces: u8,
    pub p2_pieces: u8,
}

impl GameState {
    /// Create an empty board with player one to move
    pub fn new() -> Self {
        Self::new_with_player(Player::One)
    }

    pub fn new_with_player(first_player: Player) -> Self {
        GameState {
            board: Board::new(),
            placed: [0, 0],
            to_move: first_player,
        }
    }

    /// Build a state from raw parts without checking consistency.
    pub fn from_parts(board: Board, placed: [u8; 2], to_move: Player) -> Self {
        GameState {
            board,
            placed,
            to_move,
        }
    }

    /// Decode and validate a snapshot supplied by the judge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSnapshot`] when the grid is not 8x8, a cell or
    /// player code is unknown, a count exceeds the piece limit, or a player
    /// has more pieces on the board than they have placed.
    pub fn from_external(external: &ExternalState) -> Result<Self> {
        if external.board.len() != BOARD_SIZE {
            return Err(Error::snapshot(format!(
                "expected {BOARD_SIZE} rows, got {}",
                external.board.len()
            )));
        }
        let mut board = Board::new();
        for (r, row) in external.board.iter().enumerate() {
            if row.len() != BOARD_SIZE {
                return Err(Error::snapshot(format!(
                    "row {r} has {} cells, expected {BOARD_SIZE}",
                    row.len()
                )));
            }
            for (c, &code) in row.iter().enumerate() {
                let cell = Cell::from_code(code).ok_or_else(|| {
                    Error::snapshot(format!("unknown cell code {code} at ({r}, {c})"))
                })?;
                board.set(Square::from_index(r * BOARD_SIZE + c), cell);
            }
        }
        let to_move = Player::from_code(external.current_player).ok_or_else(|| {
            Error::snapshot(format!("unknown player code {}", external.current_player))
        })?;
        let placed = [external.p1_pieces, external.p2_pieces];
        for player in [Player::One, Player::Two] {
            let count = placed[player.index()];
            if count > NUM_PIECES {
                return Err(Error::snapshot(format!(
                    "{player} placed {count} pieces, limit is {NUM_PIECES}"
                )));
            }
            let on_board = board.count(player);
            if on_board > count as usize {
                return Err(Error::snapshot(format!(
                    "{player} has {on_board} pieces on the board but placed only {count}"
                )));
            }
        }
        Ok(GameState {
            board,
            placed,
            to_move,
        })
    }

    pub fn to_external(&self) -> ExternalState {
        ExternalState {
            board: (0..BOARD_SIZE)
                .map(|r| {
                    (0..BOARD_SIZE)
                        .map(|c| self.board.get(Square::from_index(r * BOARD_SIZE + c)).code())
                        .collect()
                })
                .collect(),
            current_player: self.to_move.code(),
            p1_pieces: self.placed[0],
            p2_pieces: self.placed[1],
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Pieces `player` has placed so far (0..=8).
    pub fn placed(&self, player: Player) -> u8 {
        self.placed[player.index()]
    }

    /// Whether `player` still has pieces to place.
    pub fn in_placement(&self, player: Player) -> bool {
        self.placed(player) < NUM_PIECES
    }

    pub fn pieces_on_board(&self, player: Player) -> usize {
        self.board.count(player)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self)
    }

    /// Fill `moves` with the legal moves, reusing its allocation.
    pub fn legal_moves_into(&self, moves: &mut Vec<Move>) {
        legal_moves_into(self, moves)
    }

    /// Key identifying this position in a value table.
    pub fn state_key(&self) -> StateKey {
        StateKey::from(self)
    }

    /// The winner of this position, if any.
    ///
    /// A player wins by owning a line of three (wrapping on the torus). If
    /// both players own a line, the player who made the last action wins.
    /// A player who finished placing but has fewer than
    /// [`MIN_VIABLE_PIECES`] on the board loses.
    pub fn check_winner(&self) -> Option<Player> {
        let last_mover = self.to_move.opponent();
        if has_line(&self.board, last_mover) {
            return Some(last_mover);
        }
        if has_line(&self.board, self.to_move) {
            return Some(self.to_move);
        }
        [last_mover, self.to_move]
            .into_iter()
            .find(|&p| !self.in_placement(p) && self.pieces_on_board(p) < MIN_VIABLE_PIECES)
            .map(Player::opponent)
    }

    pub fn is_terminal(&self) -> bool {
        self.check_winner().is_some()
    }

    /// Place a piece for the side to move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalMove`] if the mover has no pieces left to place
    /// or the target square is occupied.
    pub fn place(&mut self, to: Square) -> Result<Undo> {
        let mv = Move::Place { to };
        if !self.in_placement(self.to_move) {
            return Err(illegal(mv, "all pieces already placed"));
        }
        if !self.board.get(to).is_empty() {
            return Err(illegal(mv, "target square is occupied"));
        }
        Ok(self.apply(mv))
    }

    /// Move one of the mover's pieces to an empty square.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalMove`] if the mover is still placing, the source
    /// is not the mover's piece, or the destination is occupied.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<Undo> {
        let mv = Move::Shift { from, to };
        if self.in_placement(self.to_move) {
            return Err(illegal(mv, "pieces remain to be placed"));
        }
        if self.board.get(from) != self.to_move.to_cell() {
            return Err(illegal(mv, "source square does not hold the mover's piece"));
        }
        if !self.board.get(to).is_empty() {
            return Err(illegal(mv, "destination square is occupied"));
        }
        Ok(self.apply(mv))
    }

    /// Apply a move with full legality checks.
    pub fn try_apply(&mut self, mv: Move) -> Result<Undo> {
        match mv {
            Move::Place { to } => self.place(to),
            Move::Shift { from, to } => self.move_piece(from, to),
        }
    }

    /// Apply a move generated for this exact state.
    ///
    /// Legality is only checked in debug builds; search calls this on its hot path.
    pub fn apply(&mut self, mv: Move) -> Undo {
        let mover = self.to_move;
        let mut changes = Changes::new();
        let landing = match mv {
            Move::Place { to } => {
                debug_assert!(self.in_placement(mover) && self.board.get(to).is_empty());
                changes.push((to, self.board.get(to)));
                self.board.set(to, mover.to_cell());
                self.placed[mover.index()] += 1;
                to
            }
            Move::Shift { from, to } => {
                debug_assert!(!self.in_placement(mover));
                debug_assert!(
                    self.board.get(from) == mover.to_cell() && self.board.get(to).is_empty()
                );
                changes.push((from, self.board.get(from)));
                changes.push((to, self.board.get(to)));
                self.board.set(from, Cell::Empty);
                self.board.set(to, mover.to_cell());
                to
            }
        };
        self.push_from(landing, &mut changes);
        self.to_move = mover.opponent();
        Undo {
            changes,
            placed: mv.is_placement(),
            mover,
        }
    }

    /// Push effect around `origin`.
    ///
    /// Every direction is judged against the board as it stands before any
    /// displacement, then all displacements are applied.
    fn push_from(&mut self, origin: Square, changes: &mut Changes) {
        let mut displaced: SmallVec<[(Square, Square); 8]> = SmallVec::new();
        for &(dr, dc) in &DIRECTIONS {
            let (dr, dc) = (dr as i32, dc as i32);
            let near = origin.offset(dr, dc);
            if self.board.get(near).is_empty() {
                continue;
            }
            let far = origin.offset(2 * dr, 2 * dc);
            if self.board.get(far).is_empty() {
                displaced.push((near, far));
            }
        }
        for (near, far) in displaced {
            changes.push((far, self.board.get(far)));
            changes.push((near, self.board.get(near)));
            self.board.swap(near, far);
        }
    }

    /// Reverse an action. `undo` must come from the most recent `apply` on this state.
    pub fn undo(&mut self, undo: Undo) {
        for &(square, previous) in undo.changes.iter().rev() {
            self.board.set(square, previous);
        }
        if undo.placed {
            self.placed[undo.mover.index()] -= 1;
        }
        self.to_move = undo.mover;
    }

    /// Apply `mv` and return a guard that undoes it when dropped.
    pub fn play(&mut self, mv: Move) -> MoveGuard<'_> {
        let undo = self.apply(mv);
        MoveGuard {
            state: self,
            undo: Some(undo),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        write!(
            f,
            "P1 placed {}, P2 placed {}, {} to move",
            self.placed[0], self.placed[1], self.to_move
        )
    }
}

fn illegal(mv: Move, reason: &str) -> Error {
    Error::IllegalMove {
        mv: mv.to_string(),
        reason: reason.to_string(),
    }
}

/// A move applied to a borrowed state, undone on drop.
///
/// Dereferences to the state after the move, so recursion can continue on it.
pub struct MoveGuard<'a> {
    state: &'a mut GameState,
    undo: Option<Undo>,
}

impl Deref for MoveGuard<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.state
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        self.state
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.state.undo(undo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(r: usize, c: usize) -> Square {
        Square::new(r, c).unwrap()
    }

    #[test]
    fn test_place_flips_side_and_counts() {
        let mut state = GameState::new();
        state.place(sq(0, 0)).unwrap();
        assert_eq!(state.to_move(), Player::Two);
        assert_eq!(state.placed(Player::One), 1);
        assert_eq!(state.board().get(sq(0, 0)), Cell::One);
    }

    #[test]
    fn test_place_on_occupied_square_fails() {
        let mut state = GameState::new();
        state.place(sq(2, 2)).unwrap();
        assert!(matches!(state.place(sq(2, 2)), Err(Error::IllegalMove { .. })));
    }

    #[test]
    fn test_push_moves_neighbour_two_steps_out() {
        let mut state = GameState::new();
        state.place(sq(4, 4)).unwrap();
        let undo = state.place(sq(4, 3)).unwrap();
        assert_eq!(state.board().get(sq(4, 4)), Cell::Empty);
        assert_eq!(state.board().get(sq(4, 5)), Cell::One);
        assert_eq!(undo.pushes(), vec![(sq(4, 4), sq(4, 5))]);
    }

    #[test]
    fn test_undo_restores_pushed_pieces() {
        let mut state = GameState::new();
        state.place(sq(4, 4)).unwrap();
        let before = state;
        let undo = state.place(sq(4, 3)).unwrap();
        state.undo(undo);
        assert_eq!(state, before);
    }

    #[test]
    fn test_guard_undoes_on_drop() {
        let mut state = GameState::new();
        state.place(sq(1, 1)).unwrap();
        let before = state;
        {
            let child = state.play(Move::place(1, 2).unwrap());
            assert_eq!(child.to_move(), Player::One);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_external_roundtrip() {
        let mut state = GameState::new();
        state.place(sq(0, 7)).unwrap();
        state.place(sq(5, 2)).unwrap();
        let external = state.to_external();
        assert_eq!(external.board[0][7], 1);
        assert_eq!(external.board[5][2], -1);
        assert_eq!(GameState::from_external(&external).unwrap(), state);
    }

    #[test]
    fn test_external_rejects_malformed_snapshots() {
        let mut external = GameState::new().to_external();
        external.board.pop();
        assert!(GameState::from_external(&external).is_err());

        let mut external = GameState::new().to_external();
        external.board[0][0] = 2;
        assert!(GameState::from_external(&external).is_err());

        let mut external = GameState::new().to_external();
        external.board[0][0] = 1;
        assert!(matches!(
            GameState::from_external(&external),
            Err(Error::InvalidSnapshot { .. })
        ));
    }
}
