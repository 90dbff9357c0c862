//! Songs command: library report.

use std::path::Path;

use anyhow::Result;

use crate::cli_utils;

fn status(present: bool) -> &'static str {
    if present { "ok" } else { "missing" }
}

pub fn run(songs_dir: &Path) -> Result<()> {
    let library = cli_utils::scan_library(songs_dir)?;
    eprintln!("Scanning {}", songs_dir.display());

    if library.songs().is_empty() {
        println!("No songs found");
        return Ok(());
    }

    for song in library.songs() {
        let difficulties = if song.difficulties.is_empty() {
            "none".to_string()
        } else {
            song.difficulties
                .iter()
                .map(|d| d.file_stem())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "- {} ({}): audio={}, diffs=[{}], cover={}, bg={}{}",
            song.id,
            song.title,
            status(song.audio.is_some()),
            difficulties,
            status(song.cover.is_some()),
            status(song.background.is_some()),
            if song.is_playable() { "" } else { " [not playable]" }
        );
    }

    let playable = library.playable().count();
    println!("{} of {} songs playable", playable, library.songs().len());
    Ok(())
}
