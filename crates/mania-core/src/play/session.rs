//! Frame-driven session loop state.
//!
//! A session runs `Ready → Playing → Completed | Aborted`. Only a completed
//! session produces a [`ResultSummary`]; an aborted one never reaches the
//! leaderboard.

use tracing::{debug, info};

use crate::chart::Timeline;
use crate::config::timing;

use super::{HitEvent, JudgmentEngine, ResultSummary, SessionPhase, SongClock};

/// "Is the track still playing" signal from the audio side.
pub trait PlaybackSignal {
    /// `elapsed_ms` is wall time since the session started.
    fn is_playing(&mut self, elapsed_ms: i64) -> bool;
}

/// Playback stand-in that "plays" for a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedPlayback {
    duration_ms: i64,
}

impl TimedPlayback {
    pub fn new(duration_ms: i64) -> Self {
        Self { duration_ms }
    }

    /// Lasts until the last note plus the completion margin.
    pub fn for_timeline(timeline: &Timeline) -> Self {
        Self::new(
            timeline
                .last_note_ms()
                .saturating_add(timing::COMPLETION_MARGIN_MS),
        )
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }
}

impl PlaybackSignal for TimedPlayback {
    fn is_playing(&mut self, elapsed_ms: i64) -> bool {
        elapsed_ms < self.duration_ms
    }
}

#[derive(Debug)]
pub struct PlaySession {
    engine: JudgmentEngine,
    latency_offset_ms: i64,
    clock: Option<SongClock>,
    phase: SessionPhase,
}

impl PlaySession {
    pub fn new(engine: JudgmentEngine, latency_offset_ms: i64) -> Self {
        Self {
            engine,
            latency_offset_ms,
            clock: None,
            phase: SessionPhase::Ready,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn engine(&self) -> &JudgmentEngine {
        &self.engine
    }

    pub fn clock(&self) -> Option<SongClock> {
        self.clock
    }

    /// Fix the clock reference and begin playing. Ignored unless `Ready`.
    pub fn start(&mut self, ticks: i64) {
        if self.phase != SessionPhase::Ready {
            return;
        }
        self.clock = Some(SongClock::new(ticks, self.latency_offset_ms));
        self.phase = SessionPhase::Playing;
        debug!(
            "Session started: {} [{}], latency {}ms",
            self.engine.timeline().song_id(),
            self.engine.timeline().difficulty(),
            self.latency_offset_ms
        );
    }

    /// Song time at `ticks`, once started.
    pub fn song_time(&self, ticks: i64) -> Option<i64> {
        self.clock.map(|clock| clock.now_at(ticks))
    }

    fn playing_clock(&self) -> Option<SongClock> {
        match self.phase {
            SessionPhase::Playing => self.clock,
            _ => None,
        }
    }

    /// Forward a lane press. Presses outside `Playing` are dropped.
    pub fn press(&mut self, lane: usize, ticks: i64) -> Option<HitEvent> {
        let clock = self.playing_clock()?;
        self.engine.on_lane_press(lane, clock.now_at(ticks))
    }

    /// Run one frame: retire expired notes and check for completion.
    ///
    /// The session completes once playback has stopped and more than the
    /// completion margin of wall time has elapsed.
    pub fn frame(&mut self, ticks: i64, still_playing: bool) -> SessionPhase {
        let Some(clock) = self.playing_clock() else {
            return self.phase;
        };

        self.engine.tick(clock.now_at(ticks));

        if !still_playing && clock.elapsed_at(ticks) > timing::COMPLETION_MARGIN_MS {
            self.phase = SessionPhase::Completed;
            let tracker = self.engine.tracker();
            info!(
                "Session completed: score {}, max combo {}, accuracy {:.2}%",
                tracker.score(),
                tracker.max_combo(),
                tracker.accuracy() * 100.0
            );
        }

        self.phase
    }

    /// Run one frame, asking `playback` whether the track is still playing.
    pub fn frame_with<P: PlaybackSignal>(&mut self, ticks: i64, playback: &mut P) -> SessionPhase {
        let elapsed = self.clock.map_or(0, |clock| clock.elapsed_at(ticks));
        let still_playing = playback.is_playing(elapsed);
        self.frame(ticks, still_playing)
    }

    /// Stop the session without a result. Ignored once finished.
    pub fn abort(&mut self) {
        if self.phase.is_finished() {
            return;
        }
        self.phase = SessionPhase::Aborted;
        info!(
            "Session aborted: {} [{}]",
            self.engine.timeline().song_id(),
            self.engine.timeline().difficulty()
        );
    }

    /// Final summary, only for a completed session.
    pub fn finish(&self, player_name: &str) -> Option<ResultSummary> {
        if self.phase != SessionPhase::Completed {
            return None;
        }
        let timeline = self.engine.timeline();
        Some(ResultSummary::from_tracker(
            timeline.song_id(),
            timeline.difficulty(),
            player_name,
            self.engine.tracker(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Difficulty, Note};
    use crate::play::{HitWindows, JudgmentTier};

    fn session(notes: Vec<Note>, latency: i64) -> PlaySession {
        let timeline = Timeline::from_notes("test", Difficulty::Easy, 4, notes).unwrap();
        PlaySession::new(JudgmentEngine::new(timeline, HitWindows::default()), latency)
    }

    #[test]
    fn test_press_before_start_is_ignored() {
        let mut session = session(vec![Note::new(0, 0)], 0);
        assert!(session.press(0, 0).is_none());
        assert_eq!(session.frame(100, true), SessionPhase::Ready);
    }

    #[test]
    fn test_latency_offset_shifts_song_time() {
        let mut session = session(vec![Note::new(1000, 0)], -60);
        session.start(10_000);
        assert_eq!(session.song_time(11_000), Some(940));

        // Wall 1040ms after start is song time 980ms: 20ms early
        let hit = session.press(0, 11_040).unwrap();
        assert_eq!(hit.tier, JudgmentTier::Perfect);
        assert_eq!(hit.offset_ms, -20);
    }

    #[test]
    fn test_completes_after_playback_and_margin() {
        let mut session = session(vec![Note::new(100, 0)], 0);
        session.start(0);

        assert_eq!(session.frame(500, false), SessionPhase::Playing);
        assert_eq!(session.frame(1000, false), SessionPhase::Playing);
        assert_eq!(session.frame(900, true), SessionPhase::Playing);
        assert_eq!(session.frame(1001, false), SessionPhase::Completed);

        let summary = session.finish("Player").unwrap();
        assert_eq!(summary.song_id, "test");
        assert_eq!(summary.player_name, "Player");
        assert_eq!(summary.counts.miss, 1);
        assert_eq!(summary.accuracy, 0.0);
    }

    #[test]
    fn test_aborted_session_has_no_result() {
        let mut session = session(vec![Note::new(100, 0)], 0);
        session.start(0);
        session.press(0, 100);
        session.abort();

        assert_eq!(session.phase(), SessionPhase::Aborted);
        assert!(session.finish("Player").is_none());
        assert!(session.press(0, 100).is_none());
        assert_eq!(session.frame(5000, false), SessionPhase::Aborted);
    }

    #[test]
    fn test_abort_after_completion_is_ignored() {
        let mut session = session(Vec::new(), 0);
        session.start(0);
        session.frame(2000, false);
        session.abort();
        assert_eq!(session.phase(), SessionPhase::Completed);
    }

    #[test]
    fn test_timed_playback() {
        let mut session = session(vec![Note::new(500, 0), Note::new(1500, 1)], 0);
        let mut playback = TimedPlayback::for_timeline(session.engine().timeline());
        assert_eq!(playback.duration_ms(), 2500);

        session.start(0);
        session.press(0, 510);
        session.press(1, 1600);
        assert_eq!(session.frame_with(2499, &mut playback), SessionPhase::Playing);
        assert_eq!(session.frame_with(2500, &mut playback), SessionPhase::Completed);

        let summary = session.finish("P").unwrap();
        assert_eq!(summary.score, 400);
        assert_eq!(summary.max_combo, 2);
        assert!((summary.accuracy - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_timed_playback_saturates_for_late_notes() {
        let timeline = Timeline::from_notes(
            "test",
            Difficulty::Easy,
            4,
            vec![Note::new(i64::MAX - 10, 0)],
        )
        .unwrap();
        let mut playback = TimedPlayback::for_timeline(&timeline);

        assert_eq!(playback.duration_ms(), i64::MAX);
        assert!(playback.is_playing(0));
    }

    #[test]
    fn test_not_finished_while_playing() {
        let mut session = session(vec![Note::new(100, 0)], 0);
        session.start(0);
        assert!(session.finish("P").is_none());
    }
}
