//! Board representation: cells, players, squares on the 8x8 torus

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side length of the board.
pub const BOARD_SIZE: usize = 8;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Pieces each player places before the movement phase starts.
pub const NUM_PIECES: u8 = 8;

/// The eight compass directions as (row, column) steps, clockwise from north-west.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    One,
    Two,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The owner of the piece in this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::One => Some(Player::One),
            Cell::Two => Some(Player::Two),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::One => '1',
            Cell::Two => '2',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' | '0' => Some(Cell::Empty),
            '1' | 'X' | 'x' => Some(Cell::One),
            '2' | 'O' | 'o' => Some(Cell::Two),
            _ => None,
        }
    }

    /// Integer code used by the external representation (0, 1, -1).
    pub fn code(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::One => 1,
            Cell::Two => -1,
        }
    }

    pub fn from_code(code: i8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::One),
            -1 => Some(Cell::Two),
            _ => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::One => Cell::One,
            Player::Two => Cell::Two,
        }
    }

    /// Slot of this player in per-player arrays.
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Integer code used by the external representation (1 or -1).
    pub fn code(self) -> i8 {
        self.to_cell().code()
    }

    pub fn from_code(code: i8) -> Option<Player> {
        Cell::from_code(code).and_then(Cell::owner)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "P1"),
            Player::Two => write!(f, "P2"),
        }
    }
}

/// A square on the board. Rows and columns are always in `0..BOARD_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Create a square, returning `None` when out of bounds.
    pub fn new(row: usize, col: usize) -> Option<Square> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Square {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Create a square from any coordinates, wrapping them onto the torus.
    pub fn wrapped(row: i32, col: i32) -> Square {
        let size = BOARD_SIZE as i32;
        Square {
            row: row.rem_euclid(size) as u8,
            col: col.rem_euclid(size) as u8,
        }
    }

    pub fn from_index(index: usize) -> Square {
        debug_assert!(index < CELL_COUNT);
        Square {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    pub fn index(self) -> usize {
        self.row() * BOARD_SIZE + self.col()
    }

    /// The square `(dr, dc)` away, wrapping around the torus.
    pub fn offset(self, dr: i32, dc: i32) -> Square {
        Square::wrapped(self.row as i32 + dr, self.col as i32 + dc)
    }

    /// Toroidal Chebyshev distance.
    pub fn distance(self, other: Square) -> usize {
        let axis = |a: usize, b: usize| {
            let d = a.abs_diff(b);
            d.min(BOARD_SIZE - d)
        };
        axis(self.row(), other.row()).max(axis(self.col(), other.col()))
    }

    /// Iterate over every square in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..CELL_COUNT).map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 64 cells of the torus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    pub fn get(&self, square: Square) -> Cell {
        self.cells[square.index()]
    }

    pub fn set(&mut self, square: Square, cell: Cell) {
        self.cells[square.index()] = cell;
    }

    pub fn swap(&mut self, a: Square, b: Square) {
        self.cells.swap(a.index(), b.index());
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Number of pieces `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        let cell = player.to_cell();
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Squares holding a piece of `player`, row-major.
    pub fn squares_of(&self, player: Player) -> impl Iterator<Item = Square> + '_ {
        let cell = player.to_cell();
        Square::all().filter(move |&sq| self.get(sq) == cell)
    }

    pub fn empty_squares(&self) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |&sq| self.get(sq).is_empty())
    }

    /// 64-character encoding, row-major.
    pub fn encode(&self) -> String {
        self.cells.iter().map(|c| c.to_char()).collect()
    }

    /// Parse a board from characters, ignoring whitespace and `/` row separators.
    pub fn parse(s: &str) -> Option<Board> {
        let mut board = Board::new();
        let mut count = 0;
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != '/') {
            if count >= CELL_COUNT {
                return None;
            }
            board.cells[count] = Cell::from_char(c)?;
            count += 1;
        }
        (count == CELL_COUNT).then_some(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            let line: String = (0..BOARD_SIZE)
                .map(|col| self.cells[row * BOARD_SIZE + col].to_char())
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
