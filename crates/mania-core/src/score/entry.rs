use std::cmp::Ordering;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::config::leaderboard::MAX_NAME_CHARS;
use crate::play::ResultSummary;

/// One persisted leaderboard record.
///
/// Fields missing from a stored record fall back to zero values, and a
/// missing `date` reads as the Unix epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    pub accuracy: f64,
    pub max_combo: u32,
    pub date: DateTime<Utc>,
}

impl LeaderboardEntry {
    /// Build an entry from a finished session, stamped with `date`.
    ///
    /// The name is cut to [`MAX_NAME_CHARS`] characters, accuracy is rounded
    /// to 4 decimals and the timestamp to whole seconds.
    pub fn from_result(result: &ResultSummary, date: DateTime<Utc>) -> Self {
        Self {
            name: truncate_chars(&result.player_name, MAX_NAME_CHARS),
            score: result.score,
            accuracy: round_accuracy(result.accuracy),
            max_combo: result.max_combo,
            date: date.trunc_subsecs(0),
        }
    }

    /// Stamp an entry with the current time.
    pub fn now(result: &ResultSummary) -> Self {
        Self::from_result(result, Utc::now())
    }

    /// Leaderboard order: score descending, accuracy descending, then older
    /// entries first.
    pub fn ranking_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.accuracy.total_cmp(&self.accuracy))
            .then_with(|| self.date.cmp(&other.date))
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn round_accuracy(accuracy: f64) -> f64 {
    (accuracy * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Difficulty;
    use crate::play::TierCounts;
    use chrono::TimeZone;

    fn result(name: &str, score: u64, accuracy: f64) -> ResultSummary {
        ResultSummary {
            song_id: "song".to_string(),
            difficulty: Difficulty::Normal,
            player_name: name.to_string(),
            score,
            accuracy,
            max_combo: 12,
            counts: TierCounts::default(),
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_from_result_normalizes_fields() {
        let date = Utc.timestamp_opt(1_700_000_000, 987_654_321).unwrap();
        let entry = LeaderboardEntry::from_result(
            &result("ABCDEFGHIJKLMNOPQRSTUVWXYZ", 900, 0.123456),
            date,
        );

        assert_eq!(entry.name, "ABCDEFGHIJKLMNOPQRST");
        assert_eq!(entry.accuracy, 0.1235);
        assert_eq!(entry.max_combo, 12);
        assert_eq!(entry.date, at(1_700_000_000));
    }

    #[test]
    fn test_name_truncation_counts_chars() {
        let entry = LeaderboardEntry::from_result(&result(&"é".repeat(25), 0, 0.0), at(0));
        assert_eq!(entry.name.chars().count(), 20);
    }

    #[test]
    fn test_ranking_cmp() {
        let base = LeaderboardEntry {
            name: "a".to_string(),
            score: 500,
            accuracy: 0.9,
            max_combo: 1,
            date: at(100),
        };
        let higher_score = LeaderboardEntry {
            score: 600,
            accuracy: 0.1,
            ..base.clone()
        };
        let higher_accuracy = LeaderboardEntry {
            accuracy: 0.95,
            ..base.clone()
        };
        let newer = LeaderboardEntry {
            date: at(200),
            ..base.clone()
        };

        assert_eq!(higher_score.ranking_cmp(&base), Ordering::Less);
        assert_eq!(higher_accuracy.ranking_cmp(&base), Ordering::Less);
        assert_eq!(base.ranking_cmp(&newer), Ordering::Less);
        assert_eq!(base.ranking_cmp(&base.clone()), Ordering::Equal);
    }

    #[test]
    fn test_serialized_shape() {
        let entry = LeaderboardEntry {
            name: "AAA".to_string(),
            score: 300,
            accuracy: 1.0,
            max_combo: 1,
            date: at(1_700_000_000),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["name"], "AAA");
        assert_eq!(json["max_combo"], 1);
        assert_eq!(json["date"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn test_lenient_deserialize() {
        let entry: LeaderboardEntry = serde_json::from_str(r#"{"name": "X", "score": 10}"#).unwrap();
        assert_eq!(entry.score, 10);
        assert_eq!(entry.accuracy, 0.0);
        assert_eq!(entry.date, DateTime::<Utc>::UNIX_EPOCH);
    }
}
