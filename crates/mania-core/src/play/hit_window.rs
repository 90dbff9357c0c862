//! Hit window tolerances and deviation classification.

use serde::{Deserialize, Serialize};

use crate::config::timing;
use crate::error::{Error, Result};

use super::JudgmentTier;

/// Inclusive tolerances in milliseconds, nested `perfect <= good <= bad`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitWindows {
    perfect: i64,
    good: i64,
    bad: i64,
}

impl Default for HitWindows {
    fn default() -> Self {
        Self {
            perfect: timing::DEFAULT_PERFECT_MS,
            good: timing::DEFAULT_GOOD_MS,
            bad: timing::DEFAULT_BAD_MS,
        }
    }
}

impl HitWindows {
    pub fn new(perfect: i64, good: i64, bad: i64) -> Result<Self> {
        let windows = Self { perfect, good, bad };
        windows.validate()?;
        Ok(windows)
    }

    pub fn validate(&self) -> Result<()> {
        if self.perfect < 0 {
            return Err(Error::InvalidHitWindows(format!(
                "perfect window must be >= 0, got {}",
                self.perfect
            )));
        }
        if self.perfect > self.good || self.good > self.bad {
            return Err(Error::InvalidHitWindows(format!(
                "windows must satisfy perfect <= good <= bad, got {}/{}/{}",
                self.perfect, self.good, self.bad
            )));
        }
        Ok(())
    }

    pub fn perfect_ms(&self) -> i64 {
        self.perfect
    }

    pub fn good_ms(&self) -> i64 {
        self.good
    }

    pub fn bad_ms(&self) -> i64 {
        self.bad
    }

    /// Tightest tier whose window contains `deviation_ms`, or `None` when the
    /// deviation is outside the Bad window.
    pub fn classify(&self, deviation_ms: i64) -> Option<JudgmentTier> {
        let abs = deviation_ms.saturating_abs();
        if abs <= self.perfect {
            Some(JudgmentTier::Perfect)
        } else if abs <= self.good {
            Some(JudgmentTier::Good)
        } else if abs <= self.bad {
            Some(JudgmentTier::Bad)
        } else {
            None
        }
    }

    /// True once `song_time_ms` is past the point where `note_time_ms` can be hit.
    pub fn is_expired(&self, note_time_ms: i64, song_time_ms: i64) -> bool {
        song_time_ms.saturating_sub(note_time_ms) > self.bad
    }
}
