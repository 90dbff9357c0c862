//! Configuration and tuning constants.
//!
//! This module contains:
//! - `KeyConfig` - lane keys, menu keys and hit window overrides
//! - `UserSettings` / `LastSelected` - per-user preferences persisted by `DataStore`
//! - Timing and leaderboard constants

mod keys;
mod settings;

pub use keys::*;
pub use settings::*;

/// Judgment timing configuration.
pub mod timing {
    /// Notes behind the visibility cursor included in a press search.
    pub const SEARCH_BEHIND: usize = 3;

    /// Notes from the visibility cursor onward included in a press search.
    pub const SEARCH_AHEAD: usize = 20;

    /// A note stops being "visible" once it is this far behind song time.
    pub const VISIBILITY_HORIZON_MS: i64 = 1000;

    /// Elapsed time that must pass before a session may complete.
    pub const COMPLETION_MARGIN_MS: i64 = 1000;

    /// Default tolerances (ms) for Perfect / Good / Bad.
    pub const DEFAULT_PERFECT_MS: i64 = 50;
    pub const DEFAULT_GOOD_MS: i64 = 100;
    pub const DEFAULT_BAD_MS: i64 = 150;
}

/// Leaderboard configuration.
pub mod leaderboard {
    /// Entries retained per (song, difficulty).
    pub const TOP_LIMIT: usize = 10;

    /// Player names are truncated to this many characters.
    pub const MAX_NAME_CHARS: usize = 20;

    /// Directory (inside a song directory) holding leaderboard files.
    pub const DIR_NAME: &str = "leaderboard";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_constants() {
        assert_eq!(timing::SEARCH_BEHIND, 3);
        assert_eq!(timing::SEARCH_AHEAD, 20);
        assert_eq!(timing::VISIBILITY_HORIZON_MS, 1000);
        assert_eq!(timing::COMPLETION_MARGIN_MS, 1000);
        assert!(timing::DEFAULT_PERFECT_MS <= timing::DEFAULT_GOOD_MS);
        assert!(timing::DEFAULT_GOOD_MS <= timing::DEFAULT_BAD_MS);
    }

    #[test]
    fn test_leaderboard_constants() {
        assert_eq!(leaderboard::TOP_LIMIT, 10);
        assert_eq!(leaderboard::MAX_NAME_CHARS, 20);
    }
}
