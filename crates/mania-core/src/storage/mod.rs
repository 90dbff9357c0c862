mod json;
mod leaderboard;

pub use json::*;
pub use leaderboard::*;
