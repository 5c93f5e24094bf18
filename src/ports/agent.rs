//! Agent port - anything that can choose a move in a position

use crate::{
    Result,
    rules::{GameState, Move},
};

/// A player in a match or training run.
///
/// Search agents, the Q-learning agent, and the random baseline all implement
/// this so pipelines can pit any two against each other.
///
/// # Examples
///
/// ```no_run
/// use push_battle::{
///     ports::Agent,
///     rules::{GameState, Move},
/// };
///
/// struct FirstMove;
///
/// impl Agent for FirstMove {
///     fn select_move(&mut self, state: &GameState) -> push_battle::Result<Move> {
///         state
///             .legal_moves()
///             .first()
///             .copied()
///             .ok_or(push_battle::Error::NoLegalMoves)
///     }
///
///     fn name(&self) -> &str {
///         "first"
///     }
/// }
/// ```
pub trait Agent: Send {
    /// Choose a move for the side to move in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalMoves`] if there is nothing to play.
    fn select_move(&mut self, state: &GameState) -> Result<Move>;

    /// Used for identification in comparisons and logging.
    fn name(&self) -> &str;

    /// Seed the agent's internal random number generator.
    ///
    /// Pipelines call this with a deterministic seed for reproducible runs.
    /// Deterministic agents can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn select_move(&mut self, state: &GameState) -> Result<Move> {
        (**self).select_move(state)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        (**self).set_rng_seed(seed)
    }
}
