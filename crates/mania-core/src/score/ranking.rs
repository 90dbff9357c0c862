//! Bounded leaderboard ranking.

use serde::Serialize;

use crate::config::leaderboard::TOP_LIMIT;

use super::{FeedbackTier, LeaderboardEntry};

/// Sorted, bounded set of entries for one (song, difficulty).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

/// Where a submitted entry landed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub entry: LeaderboardEntry,
    /// 1-based position among every candidate, before truncation.
    pub rank: usize,
    /// Candidate count before truncation.
    pub total: usize,
    pub percentile: u32,
    pub feedback: FeedbackTier,
    /// Whether the entry survived truncation to the top list.
    pub retained: bool,
}

/// `round((total - rank) / total * 100)` with ties to even; 0 for an empty set.
pub fn percentile(rank: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let better_than = total.saturating_sub(rank) as f64 / total as f64;
    (better_than * 100.0).round_ties_even() as u32
}

impl Leaderboard {
    /// Build from stored entries, re-sorting and bounding them.
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(LeaderboardEntry::ranking_cmp);
        entries.truncate(TOP_LIMIT);
        Self { entries }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add `entry`, re-rank and truncate.
    ///
    /// The rank is the position of this exact submission in the sorted
    /// candidate set, tracked by identity so an identical older record does
    /// not shadow it. `accuracy` feeds the feedback tier unrounded.
    pub fn submit(&mut self, entry: LeaderboardEntry, accuracy: f64) -> RankedResult {
        let mut candidates: Vec<(bool, LeaderboardEntry)> = self
            .entries
            .drain(..)
            .map(|e| (false, e))
            .chain(std::iter::once((true, entry.clone())))
            .collect();

        // Stable: an exact tie keeps the existing record ahead
        candidates.sort_by(|a, b| a.1.ranking_cmp(&b.1));

        let total = candidates.len();
        let rank = candidates
            .iter()
            .position(|(is_new, _)| *is_new)
            .map_or(total, |i| i + 1);

        self.entries = candidates
            .into_iter()
            .take(TOP_LIMIT)
            .map(|(_, e)| e)
            .collect();

        let percentile = percentile(rank, total);
        RankedResult {
            entry,
            rank,
            total,
            percentile,
            feedback: FeedbackTier::from_result(accuracy, percentile),
            retained: rank <= TOP_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn entry(name: &str, score: u64, accuracy: f64, secs: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            score,
            accuracy,
            max_combo: 0,
            date: at(secs),
        }
    }

    #[test]
    fn test_percentile() {
        assert_eq!(percentile(1, 0), 0);
        assert_eq!(percentile(1, 1), 0);
        assert_eq!(percentile(1, 4), 75);
        assert_eq!(percentile(3, 3), 0);
        // 12.5 and 37.5 round to even
        assert_eq!(percentile(7, 8), 12);
        assert_eq!(percentile(5, 8), 38);
        assert_eq!(percentile(1, 11), 91);
    }

    #[test]
    fn test_first_submission() {
        let mut board = Leaderboard::default();
        let ranked = board.submit(entry("A", 300, 1.0, 0), 1.0);

        assert_eq!(ranked.rank, 1);
        assert_eq!(ranked.total, 1);
        assert_eq!(ranked.percentile, 0);
        assert_eq!(ranked.feedback, FeedbackTier::Elite);
        assert!(ranked.retained);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_sort_and_truncate() {
        let mut board = Leaderboard::default();
        for i in 0..12u64 {
            board.submit(entry("p", i * 100, 0.5, i as i64), 0.5);
        }

        assert_eq!(board.len(), TOP_LIMIT);
        let scores: Vec<u64> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores.first(), Some(&1100));
        assert_eq!(scores.last(), Some(&200));
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_rank_counts_untruncated_candidates() {
        let stored = (0..10).map(|i| entry("p", 1000, 0.9, i)).collect();
        let mut board = Leaderboard::from_entries(stored);

        let ranked = board.submit(entry("low", 100, 0.4, 50), 0.4);
        assert_eq!(ranked.rank, 11);
        assert_eq!(ranked.total, 11);
        assert_eq!(ranked.percentile, 0);
        assert_eq!(ranked.feedback, FeedbackTier::Poor);
        assert!(!ranked.retained);
        assert!(board.entries().iter().all(|e| e.name != "low"));
    }

    #[test]
    fn test_older_entry_wins_tie() {
        let mut board = Leaderboard::from_entries(vec![entry("old", 500, 0.8, 10)]);
        let ranked = board.submit(entry("new", 500, 0.8, 20), 0.8);

        assert_eq!(ranked.rank, 2);
        assert_eq!(board.entries()[0].name, "old");
    }

    #[test]
    fn test_identical_record_does_not_shadow_submission() {
        let twin = entry("same", 500, 0.8, 10);
        let mut board = Leaderboard::from_entries(vec![twin.clone()]);
        let ranked = board.submit(twin, 0.8);

        assert_eq!(ranked.rank, 2);
        assert_eq!(ranked.total, 2);
        assert_eq!(ranked.percentile, 0);
    }

    #[test]
    fn test_from_entries_sorts_stored_data() {
        let board = Leaderboard::from_entries(vec![
            entry("b", 100, 0.5, 0),
            entry("a", 300, 0.5, 0),
            entry("c", 300, 0.9, 0),
        ]);
        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }
}
