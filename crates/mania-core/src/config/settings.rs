use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::Difficulty;
use crate::error::Result;
use crate::storage::{read_json_or_default, write_json_atomic};

const USER_SETTINGS_FILE: &str = "settings_user.json";
const LAST_SELECTED_FILE: &str = "last_selected.json";

/// Per-user preferences. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub volume: f32,
    pub latency_ms: i64,
    pub bg_video: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            volume: 0.8,
            latency_ms: 0,
            bg_video: false,
        }
    }
}

/// Partial update for [`UserSettings`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub volume: Option<f32>,
    pub latency_ms: Option<i64>,
    pub bg_video: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.volume.is_none() && self.latency_ms.is_none() && self.bg_video.is_none()
    }
}

impl UserSettings {
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(volume) = patch.volume {
            // Stored as a 0..=1 ratio with two decimals
            self.volume = (volume.clamp(0.0, 1.0) * 100.0).round() / 100.0;
        }
        if let Some(latency) = patch.latency_ms {
            self.latency_ms = latency;
        }
        if let Some(bg_video) = patch.bg_video {
            self.bg_video = bg_video;
        }
    }
}

/// The song and difficulty picked last time, used to preselect in menus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastSelected {
    pub song_id: Option<String>,
    pub difficulty: Option<Difficulty>,
}

/// JSON-backed store for small user data files in one directory.
#[derive(Debug, Clone)]
pub struct DataStore {
    base_dir: PathBuf,
}

impl DataStore {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        write_json_atomic(&self.path(name), value)
    }

    pub fn user_settings(&self) -> UserSettings {
        read_json_or_default(&self.path(USER_SETTINGS_FILE))
    }

    /// Apply `patch` to the stored settings and persist the result.
    pub fn update_user_settings(&self, patch: &SettingsPatch) -> Result<UserSettings> {
        let mut settings = self.user_settings();
        settings.apply(patch);
        self.save(USER_SETTINGS_FILE, &settings)?;
        debug!("Saved user settings: {:?}", settings);
        Ok(settings)
    }

    pub fn last_selected(&self) -> LastSelected {
        read_json_or_default(&self.path(LAST_SELECTED_FILE))
    }

    pub fn set_last_selected(&self, song_id: &str, difficulty: Difficulty) -> Result<()> {
        let selection = LastSelected {
            song_id: Some(song_id.to_string()),
            difficulty: Some(difficulty),
        };
        self.save(LAST_SELECTED_FILE, &selection)
    }
}
