//! Score, combo and accuracy counters for one session.

use serde::{Deserialize, Serialize};

use super::JudgmentTier;

/// Number of judgments per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub perfect: u32,
    pub good: u32,
    pub bad: u32,
    pub miss: u32,
}

impl TierCounts {
    fn add(&mut self, tier: JudgmentTier) {
        match tier {
            JudgmentTier::Perfect => self.perfect += 1,
            JudgmentTier::Good => self.good += 1,
            JudgmentTier::Bad => self.bad += 1,
            JudgmentTier::Miss => self.miss += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.perfect + self.good + self.bad + self.miss
    }
}

/// Running session state. Only the judgment engine records into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u64,
    combo: u32,
    max_combo: u32,
    hits: u32,
    total_notes: u32,
    counts: TierCounts,
}

impl ScoreTracker {
    pub fn new(total_notes: u32) -> Self {
        Self {
            total_notes,
            ..Default::default()
        }
    }

    pub(crate) fn record(&mut self, tier: JudgmentTier) {
        self.counts.add(tier);
        self.score += tier.points();

        if tier.is_hit() {
            self.hits += 1;
        }

        if tier.breaks_combo() {
            self.combo = 0;
        } else {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn total_notes(&self) -> u32 {
        self.total_notes
    }

    pub fn counts(&self) -> TierCounts {
        self.counts
    }

    /// Hits over total notes; 0 for an empty chart.
    pub fn accuracy(&self) -> f64 {
        if self.total_notes == 0 {
            return 0.0;
        }
        self.hits as f64 / self.total_notes as f64
    }

    pub fn judged(&self) -> u32 {
        self.counts.total()
    }

    pub fn remaining(&self) -> u32 {
        self.total_notes.saturating_sub(self.judged())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_and_good_extend_combo() {
        let mut tracker = ScoreTracker::new(3);
        tracker.record(JudgmentTier::Perfect);
        tracker.record(JudgmentTier::Good);

        assert_eq!(tracker.score(), 400);
        assert_eq!(tracker.combo(), 2);
        assert_eq!(tracker.max_combo(), 2);
        assert_eq!(tracker.hits(), 2);
        assert_eq!(tracker.remaining(), 1);
    }

    #[test]
    fn test_bad_scores_but_resets_combo() {
        let mut tracker = ScoreTracker::new(3);
        tracker.record(JudgmentTier::Perfect);
        tracker.record(JudgmentTier::Perfect);
        tracker.record(JudgmentTier::Bad);

        assert_eq!(tracker.score(), 650);
        assert_eq!(tracker.combo(), 0);
        assert_eq!(tracker.max_combo(), 2);
        assert_eq!(tracker.hits(), 3);
        assert!((tracker.accuracy() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_miss_resets_combo_without_hit() {
        let mut tracker = ScoreTracker::new(2);
        tracker.record(JudgmentTier::Good);
        tracker.record(JudgmentTier::Miss);

        assert_eq!(tracker.combo(), 0);
        assert_eq!(tracker.max_combo(), 1);
        assert_eq!(tracker.hits(), 1);
        assert_eq!(tracker.score(), 100);
        assert!((tracker.accuracy() - 0.5).abs() < f64::EPSILON);
        assert_eq!(
            tracker.counts(),
            TierCounts {
                perfect: 0,
                good: 1,
                bad: 0,
                miss: 1
            }
        );
    }

    #[test]
    fn test_accuracy_with_no_notes() {
        let tracker = ScoreTracker::new(0);
        assert_eq!(tracker.accuracy(), 0.0);
        assert_eq!(tracker.remaining(), 0);
    }
}
