//! CLI argument definitions for mania.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mania_core::Difficulty;

#[derive(Parser)]
#[command(name = "mania")]
#[command(about = "Lane-based rhythm game", version)]
pub struct Args {
    /// Directory holding one sub-directory per song
    #[arg(long, env = "MANIA_SONGS_DIR", default_value = "musicas", value_name = "DIR")]
    pub songs_dir: PathBuf,

    /// Directory for user settings and the last selection
    #[arg(long, env = "MANIA_DATA_DIR", default_value = "dados", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Key bindings and hit window overrides
    #[arg(
        long,
        env = "MANIA_KEY_CONFIG",
        default_value = "config/keys_pc.json",
        value_name = "FILE"
    )]
    pub key_config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List songs with their audio, beatmaps and artwork
    Songs,
    /// Check beatmap files for errors
    Validate {
        /// Only validate this song
        song_id: Option<String>,
    },
    /// Show the stored leaderboard of a chart
    Leaderboard {
        song_id: String,
        difficulty: Difficulty,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Judge a recorded press log and submit the result
    Replay {
        song_id: String,
        difficulty: Difficulty,
        /// JSON list of `{"time": ms, "lane": 1-based}` presses
        presses: PathBuf,
        #[arg(long, default_value = "Player")]
        player: String,
        /// Print the result without touching the leaderboard
        #[arg(long)]
        no_submit: bool,
    },
    /// Play a chart in the terminal
    Play {
        /// Song to play (defaults to the last selection)
        song_id: Option<String>,
        /// Difficulty to play (defaults to the last selection)
        difficulty: Option<Difficulty>,
        #[arg(long, default_value = "Player")]
        player: String,
    },
    /// Show or change user settings
    Settings {
        /// Music volume, 0.0 to 1.0
        #[arg(long)]
        volume: Option<f32>,
        /// Input latency offset in milliseconds
        #[arg(long, allow_negative_numbers = true)]
        latency: Option<i64>,
        /// Background video toggle
        #[arg(long)]
        bg_video: Option<bool>,
    },
}
