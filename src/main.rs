mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::LaunchDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // The dashboard cannot render anything without data: fail before opening
    // a window.
    let dataset = data::loader::load_file(&config.data_path)
        .inspect_err(|e| log::error!("Failed to load {}: {e}", config.data_path.display()))
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    log::info!(
        "Loaded {} launches from {} ({} sites, payload {}..={} kg)",
        dataset.len(),
        config.data_path.display(),
        dataset.sites.len(),
        dataset.payload_bounds.min,
        dataset.payload_bounds.max
    );

    let state = AppState::new(dataset, config.data_path.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(LaunchDashApp::new(state, config)))
        }),
    )
    .map_err(|e| anyhow!("running dashboard window: {e}"))
}
