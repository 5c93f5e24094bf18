//! Command-line interface: training, evaluation, and single-move queries

pub mod commands;
pub mod config;
pub mod output;
