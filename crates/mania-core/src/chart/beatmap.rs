//! Beatmap source format and validation.
//!
//! A beatmap is a JSON array of `{ "tempo": ms, "coluna": lane }` records with
//! 1-based lanes. Records do not need to be sorted by `tempo`.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

use super::Note;

const TIME_KEY: &str = "tempo";
const LANE_KEY: &str = "coluna";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// A single problem found in a beatmap source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeatmapIssue {
    /// Record index, `None` for problems with the document itself.
    pub index: Option<usize>,
    pub severity: IssueSeverity,
    pub message: String,
}

impl BeatmapIssue {
    fn error(index: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            index,
            severity: IssueSeverity::Error,
            message: message.into(),
        }
    }

    fn warning(index: usize, message: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            severity: IssueSeverity::Warning,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }

    fn into_error(self) -> Error {
        Error::malformed(self.index, self.message)
    }
}

impl std::fmt::Display for BeatmapIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            IssueSeverity::Error => "error",
            IssueSeverity::Warning => "warning",
        };
        match self.index {
            Some(i) => write!(f, "{} item #{}: {}", level, i, self.message),
            None => write!(f, "{}: {}", level, self.message),
        }
    }
}

/// Read the `tempo` of a record as whole milliseconds.
///
/// Fractional values are truncated toward zero.
fn record_time(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|t| t.trunc() as i64))
}

fn validate_record(index: usize, record: &Value, lane_count: usize) -> Vec<BeatmapIssue> {
    let mut issues = Vec::new();

    let Some(object) = record.as_object() else {
        issues.push(BeatmapIssue::error(Some(index), "record is not a JSON object"));
        return issues;
    };

    match object.get(TIME_KEY) {
        None => issues.push(BeatmapIssue::error(
            Some(index),
            format!("missing key '{}'", TIME_KEY),
        )),
        Some(value) if !value.is_number() => issues.push(BeatmapIssue::error(
            Some(index),
            format!("'{}' must be a number (ms), got {}", TIME_KEY, value),
        )),
        Some(value) => {
            if value.as_f64().is_some_and(|t| t < 0.0) {
                issues.push(BeatmapIssue::error(
                    Some(index),
                    format!("'{}' must be >= 0, got {}", TIME_KEY, value),
                ));
            }
        }
    }

    match object.get(LANE_KEY) {
        None => issues.push(BeatmapIssue::error(
            Some(index),
            format!("missing key '{}'", LANE_KEY),
        )),
        Some(value) => match value.as_i64() {
            None => issues.push(BeatmapIssue::error(
                Some(index),
                format!(
                    "'{}' must be an integer 1..{}, got {}",
                    LANE_KEY, lane_count, value
                ),
            )),
            Some(lane) if lane < 1 || lane > lane_count as i64 => {
                issues.push(BeatmapIssue::error(
                    Some(index),
                    format!(
                        "'{}' out of range 1..{}, got {}",
                        LANE_KEY, lane_count, lane
                    ),
                ))
            }
            Some(_) => {}
        },
    }

    issues
}

/// Collect every problem in a parsed beatmap document.
///
/// Out-of-order records are reported as warnings only.
pub fn validate_beatmap(document: &Value, lane_count: usize) -> Vec<BeatmapIssue> {
    let Some(records) = document.as_array() else {
        return vec![BeatmapIssue::error(None, "root must be a JSON array")];
    };

    let mut issues = Vec::new();
    let mut latest: Option<i64> = None;

    for (index, record) in records.iter().enumerate() {
        issues.extend(validate_record(index, record, lane_count));

        if let Some(time) = record.get(TIME_KEY).and_then(record_time) {
            if let Some(prev) = latest
                && time < prev
            {
                issues.push(BeatmapIssue::warning(
                    index,
                    format!("'{}' out of order (previous={}, current={})", TIME_KEY, prev, time),
                ));
            }
            latest = Some(latest.map_or(time, |prev| prev.max(time)));
        }
    }

    issues
}

/// Validate a beatmap file, reporting unreadable JSON as a document issue.
pub fn validate_beatmap_file<P: AsRef<Path>>(path: P, lane_count: usize) -> Result<Vec<BeatmapIssue>> {
    let content = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&content) {
        Ok(document) => Ok(validate_beatmap(&document, lane_count)),
        Err(e) => Ok(vec![BeatmapIssue::error(
            None,
            format!("invalid JSON at line {}, column {}: {}", e.line(), e.column(), e),
        )]),
    }
}

/// Convert a beatmap document into notes in source order.
///
/// Fails on the first error-level issue; lanes are converted to 0-based.
pub fn parse_notes(document: &Value, lane_count: usize) -> Result<Vec<Note>> {
    if let Some(issue) = validate_beatmap(document, lane_count)
        .into_iter()
        .find(BeatmapIssue::is_error)
    {
        return Err(issue.into_error());
    }

    // Validation guarantees an array of well-formed records from here on
    let records = document.as_array().map(Vec::as_slice).unwrap_or_default();
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let time = record.get(TIME_KEY).and_then(record_time);
            let lane = record.get(LANE_KEY).and_then(Value::as_i64);
            match (time, lane) {
                (Some(time), Some(lane)) => Ok(Note::new(time, (lane - 1) as usize)),
                _ => Err(Error::malformed(Some(index), "unreadable record")),
            }
        })
        .collect()
}

/// Read a beatmap file and convert it into notes in source order.
pub fn load_beatmap<P: AsRef<Path>>(path: P, lane_count: usize) -> Result<Vec<Note>> {
    let content = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&content)
        .map_err(|e| Error::malformed(None, format!("invalid JSON: {}", e)))?;
    parse_notes(&document, lane_count)
}
