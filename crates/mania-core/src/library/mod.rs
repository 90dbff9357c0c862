//! Song directory scanning.
//!
//! Each song is a sub-directory of the songs directory holding its audio,
//! optional artwork and one beatmap file per difficulty.

use std::path::{Path, PathBuf};

use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::chart::{Difficulty, Timeline};
use crate::error::{Error, Result};

const AUDIO_FILES: &[&str] = &["audio.mp3", "musica.mp3"];
const COVER_FILES: &[&str] = &["capa.png", "capa.jpg", "cover.png", "cover.jpg"];
const BACKGROUND_FILES: &[&str] = &["background.png", "background.jpg"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongEntry {
    pub id: String,
    pub title: String,
    pub dir: PathBuf,
    pub audio: Option<PathBuf>,
    pub cover: Option<PathBuf>,
    pub background: Option<PathBuf>,
    pub difficulties: Vec<Difficulty>,
}

impl SongEntry {
    /// Inspect one song directory.
    pub fn from_dir(dir: &Path) -> Option<Self> {
        let id = dir.file_name()?.to_str()?.to_string();
        let difficulties = Difficulty::iter()
            .filter(|d| beatmap_file(dir, *d).is_file())
            .collect();

        Some(Self {
            title: title_from_id(&id),
            audio: first_existing(dir, AUDIO_FILES),
            cover: first_existing(dir, COVER_FILES),
            background: first_existing(dir, BACKGROUND_FILES),
            difficulties,
            dir: dir.to_path_buf(),
            id,
        })
    }

    /// Has audio and at least one beatmap.
    pub fn is_playable(&self) -> bool {
        self.audio.is_some() && !self.difficulties.is_empty()
    }

    pub fn has_difficulty(&self, difficulty: Difficulty) -> bool {
        self.difficulties.contains(&difficulty)
    }

    pub fn beatmap_path(&self, difficulty: Difficulty) -> PathBuf {
        beatmap_file(&self.dir, difficulty)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SongLibrary {
    root: PathBuf,
    songs: Vec<SongEntry>,
}

impl SongLibrary {
    /// Scan `songs_dir`, sorted by directory name.
    pub fn scan<P: AsRef<Path>>(songs_dir: P) -> Result<Self> {
        let root = songs_dir.as_ref().to_path_buf();
        let mut dirs = Vec::new();
        for entry in std::fs::read_dir(&root)? {
            let path = entry?.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort();

        let songs: Vec<SongEntry> = dirs.iter().filter_map(|d| SongEntry::from_dir(d)).collect();
        debug!("Scanned {} songs in {}", songs.len(), root.display());

        Ok(Self { root, songs })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn songs(&self) -> &[SongEntry] {
        &self.songs
    }

    pub fn playable(&self) -> impl Iterator<Item = &SongEntry> {
        self.songs.iter().filter(|s| s.is_playable())
    }

    pub fn find(&self, song_id: &str) -> Option<&SongEntry> {
        self.songs.iter().find(|s| s.id == song_id)
    }

    fn require(&self, song_id: &str) -> Result<&SongEntry> {
        self.find(song_id)
            .ok_or_else(|| Error::SongNotFound(song_id.to_string()))
    }

    pub fn resolve_audio(&self, song_id: &str) -> Result<PathBuf> {
        let song = self.require(song_id)?;
        song.audio
            .clone()
            .ok_or_else(|| Error::MissingAudio(song.dir.join(AUDIO_FILES[0])))
    }

    pub fn beatmap_path(&self, song_id: &str, difficulty: Difficulty) -> Result<PathBuf> {
        let song = self.require(song_id)?;
        if !song.has_difficulty(difficulty) {
            return Err(Error::MissingBeatmap {
                song_id: song_id.to_string(),
                difficulty,
            });
        }
        Ok(song.beatmap_path(difficulty))
    }

    pub fn load_timeline(
        &self,
        song_id: &str,
        difficulty: Difficulty,
        lane_count: usize,
    ) -> Result<Timeline> {
        let path = self.beatmap_path(song_id, difficulty)?;
        Timeline::load_file(song_id, difficulty, lane_count, path)
    }
}

fn beatmap_file(dir: &Path, difficulty: Difficulty) -> PathBuf {
    dir.join(format!("{}.json", difficulty.file_stem()))
}

fn first_existing(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names.iter().map(|n| dir.join(n)).find(|p| p.is_file())
}

/// `my_song_02` -> `My Song 02`
fn title_from_id(id: &str) -> String {
    let mut title = String::with_capacity(id.len());
    let mut prev_alpha = false;
    for c in id.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            title.push(c);
            prev_alpha = false;
        }
    }
    title
}
