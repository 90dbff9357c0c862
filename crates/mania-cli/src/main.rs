mod cli;
mod cli_utils;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (warn unless RUST_LOG says otherwise)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mania_cli=warn,mania_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Songs => commands::songs::run(&args.songs_dir),
        Command::Validate { song_id } => {
            commands::validate::run(&args.songs_dir, &args.key_config, song_id.as_deref())
        }
        Command::Leaderboard {
            song_id,
            difficulty,
            json,
        } => commands::leaderboard::run(&args.songs_dir, &song_id, difficulty, json),
        Command::Replay {
            song_id,
            difficulty,
            presses,
            player,
            no_submit,
        } => commands::replay::run(
            &args.songs_dir,
            &args.key_config,
            &song_id,
            difficulty,
            &presses,
            &player,
            !no_submit,
        ),
        Command::Play {
            song_id,
            difficulty,
            player,
        } => commands::play::run(
            &args.songs_dir,
            &args.data_dir,
            &args.key_config,
            song_id,
            difficulty,
            &player,
        ),
        Command::Settings {
            volume,
            latency,
            bg_video,
        } => commands::settings::run(&args.data_dir, volume, latency, bg_video),
    }
}
