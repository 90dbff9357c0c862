//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod leaderboard;
pub mod play;
pub mod replay;
pub mod settings;
pub mod songs;
pub mod validate;
