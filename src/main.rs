mod analysis;
mod app;
mod color;
mod data;
mod export;
mod geometry;
mod projection;
mod settings;
mod state;
mod ui;

use std::path::PathBuf;

use app::{StartupOptions, StereonetApp, WINDOW_TITLE};
use clap::Parser;
use eframe::egui;
use projection::Projection;

/// Plot structural measurements on a stereonet.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// `.snet` file, or slash-separated `.txt`/`.csv`, to open at startup.
    file: Option<PathBuf>,

    /// Projection to start with (overrides the saved one).
    #[arg(long, value_enum)]
    projection: Option<Projection>,

    /// Log filter, e.g. `info` or `stereonet=debug`. `RUST_LOG` wins.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> eframe::Result {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let startup = StartupOptions {
        file: args.file,
        projection: args.projection,
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(StereonetApp::new(cc, startup)))),
    )
}
