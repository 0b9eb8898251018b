#![warn(clippy::all, rust_2018_idioms)]

use std::path::PathBuf;

use clap::Parser;
use monoboard::{BoardApp, Config};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON settings file
    #[arg(long, default_value = "monoboard.json")]
    config: PathBuf,
    /// Directory holding saved whiteboards (overrides the config file)
    #[arg(long)]
    storage_dir: Option<PathBuf>,
    /// SVG file to open on start
    #[arg(long)]
    import: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let args = Args::parse();
    let mut config = match Config::load_or_default(Some(&args.config)) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}; using default settings", err);
            Config::default()
        }
    };
    if let Some(dir) = args.storage_dir {
        config.storage_dir = dir;
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                config.canvas_width as f32,
                config.canvas_height as f32 + 40.0,
            ])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };
    eframe::run_native(
        "monoboard",
        native_options,
        Box::new(move |cc| Ok(Box::new(BoardApp::new(cc, config, args.import)))),
    )
}
