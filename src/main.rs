use std::path::Path;

use anyhow::Context;
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

use workout_log::config::CONFIG_FILE;
use workout_log::ui::WorkoutApp;
use workout_log::{AppConfig, AppState, Store, WorkoutCollection};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load(Path::new(CONFIG_FILE)).context("failed to load settings")?;
    // Refuse to start on a document we cannot read; starting empty would
    // overwrite it on the next save.
    let collection = WorkoutCollection::open(Store::new(&config.data_file))
        .with_context(|| format!("failed to open {}", config.data_file.display()))?;
    info!(
        workouts = collection.total_workouts(),
        exercises = collection.total_exercises(),
        "starting workout log"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(config.window_size),
        ..Default::default()
    };
    let state = AppState::new(config, collection);

    eframe::run_native(
        "Workout Tracker",
        options,
        Box::new(move |cc| Ok(Box::new(WorkoutApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("window closed with an error: {e}"))
}
