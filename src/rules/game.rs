//! High-level game management

use serde::{Deserialize, Serialize};

use super::{
    board::Player,
    moves::Move,
    state::{ExternalState, GameState},
};
use crate::error::{Error, Result};

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Swap the winner perspective. Useful when mirroring games.
    pub fn swap_players(self) -> Self {
        match self {
            GameOutcome::Win(player) => GameOutcome::Win(player.opponent()),
            GameOutcome::Draw => GameOutcome::Draw,
        }
    }
}

/// A complete game with history
#[derive(Debug, Clone)]
pub struct Game {
    initial: GameState,
    state: GameState,
    moves: Vec<Move>,
    outcome: Option<GameOutcome>,
}

/// Serializable summary of a finished or interrupted game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub initial: ExternalState,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game from the standard opening position
    pub fn new() -> Self {
        Self::from_state(GameState::new())
    }

    /// Continue a game from an arbitrary position.
    pub fn from_state(initial: GameState) -> Self {
        let outcome = initial.check_winner().map(GameOutcome::Win);
        Game {
            initial,
            state: initial,
            moves: Vec::new(),
            outcome,
        }
    }

    /// Play a move, checking legality.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] once the game has an outcome and
    /// [`Error::IllegalMove`] for moves that are not legal in the current position.
    pub fn play(&mut self, mv: Move) -> Result<()> {
        if self.outcome.is_some() {
            return Err(Error::GameOver);
        }
        self.state.try_apply(mv)?;
        self.moves.push(mv);
        if let Some(winner) = self.state.check_winner() {
            self.outcome = Some(GameOutcome::Win(winner));
        }
        Ok(())
    }

    /// Stop the game without a winner.
    pub fn declare_draw(&mut self) {
        if self.outcome.is_none() {
            self.outcome = Some(GameOutcome::Draw);
        }
    }

    pub fn current_state(&self) -> &GameState {
        &self.state
    }

    pub fn initial_state(&self) -> &GameState {
        &self.initial
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Number of plies played so far.
    pub fn ply(&self) -> usize {
        self.moves.len()
    }

    /// Replay the move history from the initial position.
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is illegal, which indicates
    /// corrupted game data.
    pub fn state_sequence(&self) -> Result<Vec<GameState>> {
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        let mut state = self.initial;
        states.push(state);
        for &mv in &self.moves {
            state.try_apply(mv)?;
            states.push(state);
        }
        Ok(states)
    }

    pub fn record(&self) -> GameRecord {
        GameRecord {
            initial: self.initial.to_external(),
            moves: self.moves.clone(),
            outcome: self.outcome,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Board;

    #[test]
    fn test_line_of_three_ends_game() {
        // Opponent pieces on (0, 7) and (0, 3) block both pushes, so filling
        // (0, 1) completes a row.
        let board = Board::parse(
            "1.12...2/......../......../......../......../......../......../........",
        )
        .unwrap();
        let state = GameState::from_parts(board, [2, 2], Player::One);
        let mut game = Game::from_state(state);
        assert!(!game.is_over());

        game.play(Move::place(0, 1).unwrap()).unwrap();
        assert_eq!(game.outcome(), Some(GameOutcome::Win(Player::One)));
        assert!(matches!(
            game.play(Move::place(6, 6).unwrap()),
            Err(Error::GameOver)
        ));
    }

    #[test]
    fn test_state_sequence_replays_history() {
        let mut game = Game::new();
        game.play(Move::place(2, 2).unwrap()).unwrap();
        game.play(Move::place(2, 3).unwrap()).unwrap();
        let states = game.state_sequence().unwrap();
        assert_eq!(states.len(), 3);
        assert_eq!(states.last(), Some(game.current_state()));
    }

    #[test]
    fn test_illegal_move_leaves_game_untouched() {
        let mut game = Game::new();
        game.play(Move::place(1, 1).unwrap()).unwrap();
        assert!(game.play(Move::place(1, 1).unwrap()).is_err());
        assert_eq!(game.ply(), 1);
    }
}
