// SPDX-License-Identifier: MIT OR Apache-2.0

//! Main entry point for the egui chess viewer

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use chessview_core::GameState;
use chessview_ui_egui::app::ChessApp;
use chessview_ui_egui::assets::PieceImages;
use chessview_ui_egui::config::ViewerConfig;

/// Interactive chess board viewer
#[derive(Parser, Debug)]
#[command(name = "chessview")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file; missing or malformed files fall back to defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Square edge length in pixels
    #[arg(long)]
    square_size: Option<f32>,

    /// Directory with wK.png ... bP.png piece images
    #[arg(long)]
    pieces: Option<PathBuf>,

    /// Start from this FEN position instead of the standard setup
    #[arg(long)]
    fen: Option<String>,

    /// Debug logging
    #[arg(long)]
    debug: bool,
}

fn load_config(args: &Args) -> ViewerConfig {
    let mut config = match &args.config {
        Some(path) => match ViewerConfig::load_from_file(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Using default config");
                ViewerConfig::default()
            }
        },
        None => ViewerConfig::default(),
    };

    if let Some(size) = args.square_size {
        config.board.square_size = size;
    }
    if let Some(dir) = &args.pieces {
        config.pieces.image_dir = Some(dir.clone());
    }
    config
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.debug {
        EnvFilter::from_default_env().add_directive("debug".parse()?)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(&args);
    if config.board.square_size <= 0.0 {
        anyhow::bail!("Square size must be positive, got {}", config.board.square_size);
    }

    let game = match &args.fen {
        Some(fen) => GameState::from_fen(fen).with_context(|| format!("Invalid --fen '{}'", fen))?,
        None => GameState::new(),
    };

    // Images are decoded before the window opens so a bad set aborts startup
    let images = match &config.pieces.image_dir {
        Some(dir) => Some(
            PieceImages::load_dir(dir)
                .with_context(|| format!("Failed to load piece images from {}", dir.display()))?,
        ),
        None => None,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size(config.board_size())
            .with_resizable(false),
        ..Default::default()
    };

    tracing::info!(
        square_size = config.board.square_size,
        images = images.is_some(),
        "Starting chess viewer"
    );

    let title = config.window.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Box::new(ChessApp::new(cc, config, game, images))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run eframe: {}", e))
}
