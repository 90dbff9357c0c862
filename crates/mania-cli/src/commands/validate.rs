//! Validate command: beatmap checks for one or all songs.

use std::path::Path;

use anyhow::{Result, bail};
use mania_core::validate_beatmap_file;
use tracing::debug;

use crate::cli_utils;

pub fn run(songs_dir: &Path, key_config: &Path, song_id: Option<&str>) -> Result<()> {
    let keys = cli_utils::load_key_config(key_config)?;
    let library = cli_utils::scan_library(songs_dir)?;

    let songs: Vec<_> = match song_id {
        Some(id) => match library.find(id) {
            Some(song) => vec![song],
            None => bail!("Song '{}' not found in {}", id, songs_dir.display()),
        },
        None => library.songs().iter().collect(),
    };

    let mut errors = 0usize;
    let mut warnings = 0usize;
    let mut charts = 0usize;

    for song in songs {
        for &difficulty in &song.difficulties {
            charts += 1;
            let path = song.beatmap_path(difficulty);
            debug!("Validating {}", path.display());

            for issue in validate_beatmap_file(&path, keys.lane_count())? {
                if issue.is_error() {
                    errors += 1;
                } else {
                    warnings += 1;
                }
                println!("[{}/{}] {}", song.id, difficulty, issue);
            }
        }
    }

    println!(
        "{} charts checked: {} errors, {} warnings",
        charts, errors, warnings
    );
    if errors > 0 {
        bail!("{} beatmap error(s) found", errors);
    }
    Ok(())
}
