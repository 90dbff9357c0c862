//! # mania-core
//!
//! Core library for a lane-based rhythm game.
//!
//! This crate provides:
//! - Beatmap loading and validation, and the sorted note timeline
//! - The song clock, hit windows and the judgment engine
//! - Score, combo and accuracy tracking for a play session
//! - Leaderboard ranking with atomic JSON persistence
//! - Song library scanning and console formatting

pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod library;
pub mod play;
pub mod score;
pub mod storage;

// Re-export from chart module
pub use chart::{
    BeatmapIssue, Difficulty, IssueSeverity, Note, NoteJudgment, Timeline, load_beatmap,
    parse_notes, validate_beatmap, validate_beatmap_file,
};

// Re-export from config module
pub use config::{DataStore, KeyConfig, LastSelected, SettingsPatch, UserSettings};

// Re-export from error module
pub use error::{Error, Result};

// Re-export from export module
pub use export::{format_leaderboard, format_ranked_result, format_result_summary};

// Re-export from library module
pub use library::{SongEntry, SongLibrary};

// Re-export from play module
pub use play::{
    HitEvent, HitWindows, JudgmentEngine, JudgmentTier, ManualTicks, MonotonicTicks,
    PlaySession, PlaybackSignal, ResultSummary, ScoreTracker, SessionPhase, SongClock,
    TierCounts, TimeSource, TimedPlayback,
};

// Re-export from score module
pub use score::{FeedbackTier, Leaderboard, LeaderboardEntry, RankedResult};

// Re-export from storage module
pub use storage::LeaderboardStore;
