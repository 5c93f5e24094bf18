//! Subcommands of the `push-battle` binary

pub mod best_move;
pub mod evaluate;
pub mod train;
