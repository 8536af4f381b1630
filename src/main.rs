mod app;
mod chart;
mod config;
mod data;
mod error;
mod pipeline;
mod state;
mod ui;

use anyhow::Context;
use app::EstateDashApp;
use config::DashboardConfig;
use eframe::egui;
use pipeline::Dashboard;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env().context("reading configuration")?;
    log::info!("Reading dataset from {}", config.data_path.display());

    let dataset = data::loader::load(&config.data_path).map_err(|e| {
        log::error!("Cannot start without a dataset: {e}");
        e
    })?;
    let dashboard = Dashboard::new(dataset, &config);
    let today = chrono::Local::now().date_naive();
    let state = AppState::new(dashboard, today);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        app::TITLE,
        options,
        Box::new(|cc| Ok(Box::new(EstateDashApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
