//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    rules::{Board, CELL_COUNT, GameState, NUM_PIECES, Player},
};

/// Value-table key for a position: all 64 cells, both placement counts, and
/// the side to move.
///
/// Encoded as `"<64 cells>|<p1 placed>|<p2 placed>|<side>"` where cells use
/// `.`, `1`, `2` and the side is `1` or `2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(String);

impl StateKey {
    /// Parse and validate a key string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStateKey`] if any part is missing or malformed.
    pub fn parse(key: &str) -> Result<Self, Error> {
        Self::decode(key).map(|_| StateKey(key.to_string()))
    }

    /// Rebuild the position this key was taken from.
    pub fn to_state(&self) -> Result<GameState, Error> {
        Self::decode(&self.0)
    }

    fn decode(key: &str) -> Result<GameState, Error> {
        let invalid = |message: &str| Error::InvalidStateKey {
            key: key.to_string(),
            message: message.to_string(),
        };
        let parts: Vec<&str> = key.split('|').collect();
        let [cells, p1, p2, side] = parts.as_slice() else {
            return Err(invalid("expected four '|'-separated parts"));
        };
        if cells.chars().count() != CELL_COUNT {
            return Err(invalid("board must have 64 cells"));
        }
        let board = Board::parse(cells).ok_or_else(|| invalid("unknown cell character"))?;
        let count = |part: &str| {
            part.parse::<u8>()
                .ok()
                .filter(|&n| n <= NUM_PIECES)
                .ok_or_else(|| invalid("placement count must be 0..=8"))
        };
        let placed = [count(*p1)?, count(*p2)?];
        let to_move = match *side {
            "1" => Player::One,
            "2" => Player::Two,
            _ => return Err(invalid("side to move must be 1 or 2")),
        };
        Ok(GameState::from_parts(board, placed, to_move))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&GameState> for StateKey {
    fn from(state: &GameState) -> Self {
        let side = match state.to_move() {
            Player::One => '1',
            Player::Two => '2',
        };
        StateKey(format!(
            "{}|{}|{}|{side}",
            state.board().encode(),
            state.placed(Player::One),
            state.placed(Player::Two),
        ))
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
