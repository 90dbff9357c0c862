//! Play command: terminal play with raw-mode keyboard input.
//!
//! The terminal has no audio output, so the track length is taken from the
//! chart itself (last note plus the completion margin).

use std::io::{Stdout, Write, stdout};
use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};
use crossterm::{
    cursor::MoveToColumn,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use mania_core::export::{format_colored_tier, format_counts};
use mania_core::{
    DataStore, Difficulty, HitEvent, JudgmentEngine, KeyConfig, LeaderboardStore, MonotonicTicks,
    PlaySession, SessionPhase, TimeSource, TimedPlayback, format_ranked_result,
    format_result_summary,
};
use tracing::{debug, info};

use crate::cli_utils;

const FRAME: Duration = Duration::from_millis(16);
const LOOKAHEAD_MS: i64 = 1000;

/// Restores cooked mode when dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Lane(usize),
    Abort,
    Other,
}

/// Map a key event to a lane press or an abort request.
pub fn map_key(keys: &KeyConfig, key: &KeyEvent) -> Input {
    match key.code {
        KeyCode::Esc => Input::Abort,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Input::Abort,
        KeyCode::Char(c) => keys
            .lane_for_key(&c.to_string())
            .map_or(Input::Other, Input::Lane),
        _ => Input::Other,
    }
}

/// Pick the chart from arguments, falling back to the last selection.
pub fn resolve_selection(
    store: &DataStore,
    song_id: Option<String>,
    difficulty: Option<Difficulty>,
) -> Result<(String, Difficulty)> {
    let last = store.last_selected();
    match (song_id.or(last.song_id), difficulty.or(last.difficulty)) {
        (Some(song_id), Some(difficulty)) => Ok((song_id, difficulty)),
        _ => bail!("No previous selection; pass SONG_ID and DIFFICULTY"),
    }
}

/// Time until the next pending note of each lane, within the lookahead.
fn lane_strip(session: &PlaySession, keys: &KeyConfig, song_time: i64) -> String {
    let mut next: Vec<Option<i64>> = vec![None; keys.lane_count()];
    for (_, note) in session.engine().upcoming(song_time, LOOKAHEAD_MS) {
        if let Some(slot) = next.get_mut(note.lane())
            && slot.is_none()
        {
            *slot = Some(note.time_ms().saturating_sub(song_time));
        }
    }

    keys.lanes
        .iter()
        .zip(next)
        .map(|(key, due)| match due {
            Some(ms) => format!("[{}:{:>4}]", key, ms.max(0)),
            None => format!("[{}:----]", key),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_hud(
    out: &mut Stdout,
    session: &PlaySession,
    keys: &KeyConfig,
    ticks: i64,
    last_hit: Option<HitEvent>,
) -> Result<()> {
    let song_time = session.song_time(ticks).unwrap_or(0);
    let tracker = session.engine().tracker();
    let judgment = match last_hit {
        Some(hit) => format!("{} {:+}ms", format_colored_tier(hit.tier), hit.offset_ms),
        None => String::new(),
    };

    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(format!(
            "{}  SCORE {:>7}  COMBO {:>4}  ACC {:>6.2}%  LEFT {:>4}  {}",
            lane_strip(session, keys, song_time),
            tracker.score(),
            tracker.combo(),
            tracker.accuracy() * 100.0,
            tracker.remaining(),
            judgment
        ))
    )?;
    out.flush()?;
    Ok(())
}

/// Block until Enter/Space (true) or Esc (false).
fn wait_for_start(keys: &KeyConfig) -> Result<bool> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(true),
                _ if map_key(keys, &key) == Input::Abort => return Ok(false),
                _ => {}
            }
        }
    }
}

fn run_session(session: &mut PlaySession, keys: &KeyConfig) -> Result<()> {
    let mut out = stdout();
    let _raw = RawModeGuard::enable()?;

    queue!(
        out,
        Print(format!(
            "Lanes: {}  |  Enter to start, Esc to quit\r\n",
            keys.lanes.join(" ")
        ))
    )?;
    out.flush()?;
    if !wait_for_start(keys)? {
        session.abort();
        return Ok(());
    }

    let ticks = MonotonicTicks::new();
    let mut playback = TimedPlayback::for_timeline(session.engine().timeline());
    let mut last_hit = None;
    session.start(ticks.ticks_ms());

    loop {
        // Drain every pending key before running the frame
        if event::poll(FRAME)? {
            while event::poll(Duration::ZERO)? {
                let Event::Key(key) = event::read()? else {
                    continue;
                };
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match map_key(keys, &key) {
                    Input::Lane(lane) => {
                        if let Some(hit) = session.press(lane, ticks.ticks_ms()) {
                            last_hit = Some(hit);
                        }
                    }
                    Input::Abort => session.abort(),
                    Input::Other => {}
                }
            }
        }

        let now = ticks.ticks_ms();
        if session.frame_with(now, &mut playback).is_finished() {
            break;
        }
        render_hud(&mut out, session, keys, now, last_hit)?;
    }

    queue!(out, Print("\r\n"))?;
    out.flush()?;
    Ok(())
}

pub fn run(
    songs_dir: &Path,
    data_dir: &Path,
    key_config: &Path,
    song_id: Option<String>,
    difficulty: Option<Difficulty>,
    player: &str,
) -> Result<()> {
    let keys = cli_utils::load_key_config(key_config)?;
    let data = DataStore::new(data_dir);
    let (song_id, difficulty) = resolve_selection(&data, song_id, difficulty)?;

    let library = cli_utils::scan_library(songs_dir)?;
    let song = cli_utils::require_chart(&library, &song_id, difficulty)?;
    let audio = library.resolve_audio(&song_id)?;
    debug!("Audio track {}", audio.display());

    let timeline = library.load_timeline(&song_id, difficulty, keys.lane_count())?;
    data.set_last_selected(&song_id, difficulty)?;

    let settings = data.user_settings();
    info!(
        "Playing {} [{}], {} notes, latency {}ms",
        song.title,
        difficulty,
        timeline.len(),
        settings.latency_ms
    );
    println!("{} [{}]", song.title, difficulty.display_name());

    let engine = JudgmentEngine::new(timeline, keys.hit_windows());
    let mut session = PlaySession::new(engine, settings.latency_ms);
    run_session(&mut session, &keys)?;

    if session.phase() == SessionPhase::Aborted {
        eprintln!("Aborted, result not submitted");
        return Ok(());
    }
    let Some(summary) = session.finish(player) else {
        bail!("Session ended without a result");
    };

    println!("{}", format_result_summary(&summary));
    println!("JUDGE: {}", format_counts(&summary.counts));
    let store = LeaderboardStore::new(songs_dir);
    let ranked = store.submit(&song_id, difficulty, &summary)?;
    println!("{}", format_ranked_result(&ranked));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_map_key() {
        let keys = KeyConfig::default();
        assert_eq!(
            map_key(&keys, &key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Input::Lane(2)
        );
        assert_eq!(
            map_key(&keys, &key(KeyCode::Char('D'), KeyModifiers::SHIFT)),
            Input::Lane(0)
        );
        assert_eq!(
            map_key(&keys, &key(KeyCode::Esc, KeyModifiers::NONE)),
            Input::Abort
        );
        assert_eq!(
            map_key(&keys, &key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Input::Abort
        );
        assert_eq!(
            map_key(&keys, &key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Input::Other
        );
    }

    #[test]
    fn test_resolve_selection_falls_back_to_last() {
        let dir = TempDir::new().unwrap();
        let store = DataStore::new(dir.path());

        assert!(resolve_selection(&store, None, None).is_err());

        store.set_last_selected("neon", Difficulty::Hard).unwrap();
        let (song, difficulty) = resolve_selection(&store, None, None).unwrap();
        assert_eq!(song, "neon");
        assert_eq!(difficulty, Difficulty::Hard);

        let (song, difficulty) =
            resolve_selection(&store, Some("other".to_string()), None).unwrap();
        assert_eq!(song, "other");
        assert_eq!(difficulty, Difficulty::Hard);
    }
}
