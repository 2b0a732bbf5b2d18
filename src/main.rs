#![forbid(unsafe_code)]

mod board;
mod color;
mod config;
mod constants;
mod gui;
mod ipc;
mod opener;
mod persistence;
mod reorder;
mod thumbnail;
mod types;
mod window;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use board::Board;
use config::{DataPaths, WindowBounds};
use persistence::{JsonFileStore, Persistence};

/// Borderless pinboard of web links and folders
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory holding store.json and window-bounds.json
    #[arg(long, env = "LINKBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let paths = DataPaths::resolve(cli.data_dir);
    info!(data_dir = %paths.root().display(), "Starting LinkBoard");

    let bounds_path = paths.bounds_file();
    let bounds = WindowBounds::load(&bounds_path);
    info!(?bounds, "Loaded window bounds");

    let store = JsonFileStore::open(paths.store_file());
    info!(store = %store.path().display(), "Opened key-value store");
    let board = Board::load(Persistence::new(store));

    gui::run_gui(board, bounds, bounds_path)
}
