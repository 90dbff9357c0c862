//! Song time derived from wall-clock ticks.

use std::cell::Cell;
use std::time::Instant;

/// Source of wall-clock ticks in milliseconds.
pub trait TimeSource {
    fn ticks_ms(&self) -> i64;
}

/// Monotonic ticks measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTicks {
    origin: Instant,
}

impl MonotonicTicks {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTicks {
    fn ticks_ms(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_millis()).unwrap_or(i64::MAX)
    }
}

/// Ticks that only move when told to; used for replays and tests.
#[derive(Debug, Default)]
pub struct ManualTicks {
    now: Cell<i64>,
}

impl ManualTicks {
    pub fn new(start: i64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, ticks: i64) {
        self.now.set(ticks);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now.set(self.now.get().saturating_add(delta_ms));
    }
}

impl TimeSource for ManualTicks {
    fn ticks_ms(&self) -> i64 {
        self.now.get()
    }
}

/// Maps wall-clock ticks to song time:
/// `ticks - start_ticks + latency_offset_ms`.
///
/// A negative offset shifts song time earlier; callers must not assume the
/// result lies inside the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SongClock {
    start_ticks: i64,
    latency_offset_ms: i64,
}

impl SongClock {
    pub fn new(start_ticks: i64, latency_offset_ms: i64) -> Self {
        Self {
            start_ticks,
            latency_offset_ms,
        }
    }

    /// Start a clock at the source's current tick.
    pub fn start<T: TimeSource>(source: &T, latency_offset_ms: i64) -> Self {
        Self::new(source.ticks_ms(), latency_offset_ms)
    }

    pub fn latency_offset_ms(&self) -> i64 {
        self.latency_offset_ms
    }

    /// Wall time since start, without latency compensation.
    pub fn elapsed_at(&self, ticks: i64) -> i64 {
        ticks.saturating_sub(self.start_ticks)
    }

    pub fn now_at(&self, ticks: i64) -> i64 {
        self.elapsed_at(ticks).saturating_add(self.latency_offset_ms)
    }

    pub fn now<T: TimeSource>(&self, source: &T) -> i64 {
        self.now_at(source.ticks_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_applies_offset() {
        let clock = SongClock::new(5_000, 30);
        assert_eq!(clock.now_at(5_000), 30);
        assert_eq!(clock.now_at(6_000), 1_030);
        assert_eq!(clock.elapsed_at(6_000), 1_000);
    }

    #[test]
    fn test_negative_offset_can_go_before_zero() {
        let clock = SongClock::new(100, -40);
        assert_eq!(clock.now_at(100), -40);
        assert_eq!(clock.now_at(90), -50);
    }

    #[test]
    fn test_manual_ticks() {
        let ticks = ManualTicks::new(1_000);
        let clock = SongClock::start(&ticks, 0);
        ticks.advance(250);
        assert_eq!(clock.now(&ticks), 250);
        ticks.set(3_000);
        assert_eq!(clock.now(&ticks), 2_000);
    }

    #[test]
    fn test_monotonic_ticks_do_not_go_backwards() {
        let ticks = MonotonicTicks::new();
        let first = ticks.ticks_ms();
        let second = ticks.ticks_ms();
        assert!(first >= 0);
        assert!(second >= first);
    }
}
