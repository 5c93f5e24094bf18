//! Push Battle rules: the 8x8 torus, pushes, move generation, game records

pub mod board;
pub mod game;
pub mod lines;
pub mod moves;
pub mod state;

pub use board::{BOARD_SIZE, Board, CELL_COUNT, Cell, DIRECTIONS, NUM_PIECES, Player, Square};
pub use game::{Game, GameOutcome, GameRecord};
pub use lines::{WIN_LINE_LENGTH, has_line};
pub use moves::{Move, legal_moves, legal_moves_into};
pub use state::{ExternalState, GameState, MIN_VIABLE_PIECES, MoveGuard, Undo};
