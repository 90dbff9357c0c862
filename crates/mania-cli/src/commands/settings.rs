//! Settings command: show or update user settings.

use std::path::Path;

use anyhow::Result;
use mania_core::{DataStore, SettingsPatch, UserSettings};

fn print_settings(settings: &UserSettings) {
    println!("volume     : {:.2}", settings.volume);
    println!("latency_ms : {}", settings.latency_ms);
    println!("bg_video   : {}", settings.bg_video);
}

pub fn run(
    data_dir: &Path,
    volume: Option<f32>,
    latency: Option<i64>,
    bg_video: Option<bool>,
) -> Result<()> {
    let store = DataStore::new(data_dir);
    let patch = SettingsPatch {
        volume,
        latency_ms: latency,
        bg_video,
    };

    if patch.is_empty() {
        print_settings(&store.user_settings());
        return Ok(());
    }

    let settings = store.update_user_settings(&patch)?;
    eprintln!("Saved settings to {}", data_dir.display());
    print_settings(&settings);
    Ok(())
}
