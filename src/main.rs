//! Markpane - a desktop markdown viewer-editor with live preview.
//!
//! # Usage
//!
//! ```bash
//! markpane README.md
//! markpane --theme light notes.md
//! markpane
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use eframe::egui;

use markpane::app::{APP_NAME, App};

/// A desktop markdown viewer-editor with live preview
#[derive(Parser, Debug)]
#[command(name = "markpane", version, about, long_about = None)]
struct Cli {
    /// File to open at startup
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// UI theme (auto follows the persisted preference)
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ThemeMode {
    Auto,
    Light,
    Dark,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    // Verify the startup file exists; a file that vanishes between here
    // and the first frame degrades to a canceled open instead.
    if let Some(file) = &cli.file
        && !file.exists()
    {
        anyhow::bail!("File not found: {}", file.display());
    }

    let dark_override = match cli.theme {
        ThemeMode::Auto => None,
        ThemeMode::Light => Some(false),
        ThemeMode::Dark => Some(true),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([600.0, 400.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let initial_file = cli.file;
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, initial_file, dark_override)))),
    )
    .map_err(|err| anyhow::anyhow!("Application error: {err}"))
}
