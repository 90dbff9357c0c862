//! Replay command: judge a recorded press log.
//!
//! The log is a JSON list of `{"time": ms, "lane": n}` records, where `time`
//! is song time with latency already applied and `lane` is 1-based.

use std::path::Path;

use anyhow::{Context, Result, bail};
use mania_core::{
    Difficulty, JudgmentEngine, LeaderboardStore, PlaySession, ResultSummary,
    SessionPhase, TimedPlayback, format_ranked_result, format_result_summary,
};
use serde::Deserialize;
use tracing::debug;

use crate::cli_utils;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RecordedPress {
    pub time: i64,
    pub lane: usize,
}

/// Read a press log and convert lanes to 0-based.
pub fn load_presses(path: &Path, lane_count: usize) -> Result<Vec<RecordedPress>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut presses: Vec<RecordedPress> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid press log {}", path.display()))?;

    for (i, press) in presses.iter_mut().enumerate() {
        if press.lane < 1 || press.lane > lane_count {
            bail!(
                "Press #{} uses lane {}, expected 1..={}",
                i,
                press.lane,
                lane_count
            );
        }
        press.lane -= 1;
    }
    presses.sort_by_key(|p| p.time);
    Ok(presses)
}

/// Run presses through a session clocked at song time zero.
pub fn judge(
    engine: JudgmentEngine,
    presses: &[RecordedPress],
    player: &str,
) -> Option<ResultSummary> {
    let mut playback = TimedPlayback::for_timeline(engine.timeline());
    let mut session = PlaySession::new(engine, 0);
    session.start(0);

    for press in presses {
        session.frame_with(press.time, &mut playback);
        if let Some(hit) = session.press(press.lane, press.time) {
            debug!(
                "t={} lane {} -> {} ({:+}ms)",
                press.time,
                press.lane + 1,
                hit.tier,
                hit.offset_ms
            );
        }
    }

    let last_press = presses.last().map_or(0, |p| p.time);
    let end = last_press.max(playback.duration_ms()).saturating_add(1);
    if session.frame_with(end, &mut playback) != SessionPhase::Completed {
        return None;
    }
    session.finish(player)
}

pub fn run(
    songs_dir: &Path,
    key_config: &Path,
    song_id: &str,
    difficulty: Difficulty,
    presses_path: &Path,
    player: &str,
    submit: bool,
) -> Result<()> {
    let keys = cli_utils::load_key_config(key_config)?;
    let library = cli_utils::scan_library(songs_dir)?;
    cli_utils::require_chart(&library, song_id, difficulty)?;

    let timeline = library.load_timeline(song_id, difficulty, keys.lane_count())?;
    let presses = load_presses(presses_path, keys.lane_count())?;
    eprintln!(
        "Replaying {} presses over {} notes",
        presses.len(),
        timeline.len()
    );

    let engine = JudgmentEngine::new(timeline, keys.hit_windows());
    let Some(summary) = judge(engine, &presses, player) else {
        bail!("Replay did not complete");
    };
    println!("{}", format_result_summary(&summary));

    if submit {
        let store = LeaderboardStore::new(songs_dir);
        let ranked = store.submit(song_id, difficulty, &summary)?;
        println!("{}", format_ranked_result(&ranked));
    }
    Ok(())
}
