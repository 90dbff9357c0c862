//! Time-ordered notes for one (song, difficulty) session.

use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::play::JudgmentTier;

use super::{Difficulty, load_beatmap, parse_notes};

/// Judgment state of a note within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteJudgment {
    #[default]
    Pending,
    Hit(JudgmentTier),
    Missed,
}

impl NoteJudgment {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// A single note: hit time in song milliseconds and 0-based lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    time_ms: i64,
    lane: usize,
    judgment: NoteJudgment,
}

impl Note {
    pub fn new(time_ms: i64, lane: usize) -> Self {
        Self {
            time_ms,
            lane,
            judgment: NoteJudgment::Pending,
        }
    }

    pub fn time_ms(&self) -> i64 {
        self.time_ms
    }

    pub fn lane(&self) -> usize {
        self.lane
    }

    pub fn judgment(&self) -> NoteJudgment {
        self.judgment
    }

    pub fn is_pending(&self) -> bool {
        self.judgment.is_pending()
    }

    /// Move a pending note to its final state.
    ///
    /// Returns `false` (and changes nothing) if the note was already judged.
    pub(crate) fn resolve(&mut self, judgment: NoteJudgment) -> bool {
        if !self.is_pending() || judgment.is_pending() {
            return false;
        }
        self.judgment = judgment;
        true
    }
}

/// Notes of one (song, difficulty), sorted by time.
///
/// Equal-time notes keep their source order. The sequence itself never changes
/// after construction; only each note's judgment does.
#[derive(Debug, Clone)]
pub struct Timeline {
    song_id: String,
    difficulty: Difficulty,
    lane_count: usize,
    notes: Vec<Note>,
}

impl Timeline {
    /// Build a timeline from notes in source order.
    pub fn from_notes(
        song_id: impl Into<String>,
        difficulty: Difficulty,
        lane_count: usize,
        mut notes: Vec<Note>,
    ) -> Result<Self> {
        if let Some(note) = notes.iter().find(|n| n.lane >= lane_count) {
            return Err(Error::InvalidLane {
                lane: note.lane,
                lane_count,
            });
        }
        if let Some(index) = notes.iter().position(|n| n.time_ms < 0) {
            return Err(Error::malformed(Some(index), "note time must be >= 0"));
        }

        // sort_by_key is stable: equal times keep source order
        notes.sort_by_key(|n| n.time_ms);

        Ok(Self {
            song_id: song_id.into(),
            difficulty,
            lane_count,
            notes,
        })
    }

    /// Build a timeline from a parsed beatmap document.
    pub fn load(
        song_id: impl Into<String>,
        difficulty: Difficulty,
        lane_count: usize,
        source: &Value,
    ) -> Result<Self> {
        let notes = parse_notes(source, lane_count)?;
        Self::from_notes(song_id, difficulty, lane_count, notes)
    }

    /// Build a timeline from a beatmap file.
    pub fn load_file<P: AsRef<Path>>(
        song_id: impl Into<String>,
        difficulty: Difficulty,
        lane_count: usize,
        path: P,
    ) -> Result<Self> {
        let notes = load_beatmap(path, lane_count)?;
        Self::from_notes(song_id, difficulty, lane_count, notes)
    }

    pub fn song_id(&self) -> &str {
        &self.song_id
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Note> {
        self.notes.get_mut(index)
    }

    /// Time of the last note, 0 for an empty timeline.
    pub fn last_note_ms(&self) -> i64 {
        self.notes.last().map_or(0, |n| n.time_ms)
    }
}
