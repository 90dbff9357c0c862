//! Judgment engine: turns lane presses and frame ticks into note judgments.
//!
//! Presses are matched against a bounded neighborhood of the timeline around
//! the visibility cursor, so the cost per press does not grow with song length.
//! Notes that age past the Bad window are retired as misses by `tick`.

use tracing::trace;

use crate::chart::{Note, NoteJudgment, Timeline};
use crate::config::timing;

use super::{HitWindows, JudgmentTier, ScoreTracker};

/// Extent of the press search around the visibility cursor.
///
/// The cursor trails song time by the visibility horizon, so with the default
/// 3 behind / 20 ahead a chart denser than about 20 notes per second can put
/// due notes past the window, where presses cannot reach them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub behind: usize,
    pub ahead: usize,
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self {
            behind: timing::SEARCH_BEHIND,
            ahead: timing::SEARCH_AHEAD,
        }
    }
}

/// A press that judged a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitEvent {
    pub note_index: usize,
    pub lane: usize,
    pub tier: JudgmentTier,
    /// Press time minus note time; negative means early.
    pub offset_ms: i64,
}

#[derive(Debug, Clone)]
pub struct JudgmentEngine {
    timeline: Timeline,
    windows: HitWindows,
    search: SearchWindow,
    visibility_horizon_ms: i64,
    /// First note not yet past the visibility horizon.
    visible_cursor: usize,
    /// Every note before this index is already judged.
    miss_cursor: usize,
    tracker: ScoreTracker,
}

impl JudgmentEngine {
    pub fn new(timeline: Timeline, windows: HitWindows) -> Self {
        let total = u32::try_from(timeline.len()).unwrap_or(u32::MAX);
        Self {
            timeline,
            windows,
            search: SearchWindow::default(),
            visibility_horizon_ms: timing::VISIBILITY_HORIZON_MS,
            visible_cursor: 0,
            miss_cursor: 0,
            tracker: ScoreTracker::new(total),
        }
    }

    pub fn with_search_window(mut self, search: SearchWindow) -> Self {
        self.search = search;
        self
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn windows(&self) -> HitWindows {
        self.windows
    }

    pub fn tracker(&self) -> &ScoreTracker {
        &self.tracker
    }

    pub fn visible_cursor(&self) -> usize {
        self.visible_cursor
    }

    /// Judge a press on `lane` at `song_time_ms`.
    ///
    /// Picks the pending note of that lane with the smallest deviation inside
    /// the search neighborhood; on equal deviation the earlier note wins.
    /// Returns `None` (and changes nothing) if no note is within the Bad window.
    pub fn on_lane_press(&mut self, lane: usize, song_time_ms: i64) -> Option<HitEvent> {
        let start = self.visible_cursor.saturating_sub(self.search.behind);
        let end = self
            .visible_cursor
            .saturating_add(self.search.ahead)
            .min(self.timeline.len());

        let mut best: Option<(usize, i64)> = None;
        for (index, note) in self.timeline.notes()[start..end].iter().enumerate() {
            if !note.is_pending() || note.lane() != lane {
                continue;
            }
            let deviation = note.time_ms().abs_diff(song_time_ms);
            let deviation = i64::try_from(deviation).unwrap_or(i64::MAX);
            if best.is_none_or(|(_, best_deviation)| deviation < best_deviation) {
                best = Some((start + index, deviation));
            }
        }

        let (note_index, deviation) = best?;
        let tier = self.windows.classify(deviation)?;

        let note = self.timeline.get_mut(note_index)?;
        let offset_ms = song_time_ms.saturating_sub(note.time_ms());
        if !note.resolve(NoteJudgment::Hit(tier)) {
            return None;
        }
        self.tracker.record(tier);

        trace!(
            "lane {} note #{} {} ({:+}ms), combo {}",
            lane,
            note_index,
            tier,
            offset_ms,
            self.tracker.combo()
        );

        Some(HitEvent {
            note_index,
            lane,
            tier,
            offset_ms,
        })
    }

    /// Advance cursors to `song_time_ms` and retire expired notes as misses.
    ///
    /// Returns the number of notes newly judged as missed. Repeating a call
    /// with the same time changes nothing.
    pub fn tick(&mut self, song_time_ms: i64) -> usize {
        let notes = self.timeline.notes();
        let horizon = song_time_ms.saturating_sub(self.visibility_horizon_ms);
        while self.visible_cursor < notes.len() && notes[self.visible_cursor].time_ms() < horizon {
            self.visible_cursor += 1;
        }

        let mut missed = 0;
        while self.miss_cursor < self.timeline.len() {
            let index = self.miss_cursor;
            let Some(note) = self.timeline.get_mut(index) else {
                break;
            };
            if !self.windows.is_expired(note.time_ms(), song_time_ms) {
                break;
            }
            if note.resolve(NoteJudgment::Missed) {
                self.tracker.record(JudgmentTier::Miss);
                missed += 1;
                trace!("note #{} missed, combo reset", index);
            }
            self.miss_cursor += 1;
        }

        missed
    }

    /// Pending notes from the visibility cursor up to `song_time_ms + lookahead_ms`.
    pub fn upcoming(
        &self,
        song_time_ms: i64,
        lookahead_ms: i64,
    ) -> impl Iterator<Item = (usize, &Note)> {
        let limit = song_time_ms.saturating_add(lookahead_ms);
        self.timeline.notes()[self.visible_cursor..]
            .iter()
            .enumerate()
            .take_while(move |(_, note)| note.time_ms() <= limit)
            .filter(|(_, note)| note.is_pending())
            .map(move |(i, note)| (self.visible_cursor + i, note))
    }

    /// True when every note has a final judgment.
    pub fn all_judged(&self) -> bool {
        self.tracker.judged() as usize >= self.timeline.len()
    }
}
