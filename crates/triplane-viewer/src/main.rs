//! Triplane Viewer - Main entry point
//!
//! Opens the reference scene with front, top and side viewports.

mod app;
mod config;
mod ui;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use triplane_scene::ViewType;

#[derive(Parser, Debug)]
#[command(name = "triplane")]
#[command(about = "Three-plane reference scene with front/top/side view cameras")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "triplane.toml")]
    config: PathBuf,

    /// Initial active view (front, top, side)
    #[arg(short, long)]
    view: Option<ViewType>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Triplane v{}", env!("CARGO_PKG_VERSION"));

    let mut config = config::load_config(&args.config)?;

    if let Some(view) = args.view {
        config.controls.initial_view = view;
    }

    info!(
        view = %config.controls.initial_view,
        plane_size = config.scene.plane_size,
        "Configuration loaded"
    );

    app::run(config);

    Ok(())
}
