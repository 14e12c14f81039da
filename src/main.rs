use anyhow::{anyhow, Context};
use eframe::egui;

use salary_dashboard::app::SalaryDashboardApp;
use salary_dashboard::config::DashboardConfig;
use salary_dashboard::data::loader;
use salary_dashboard::state::Session;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = DashboardConfig::from_env().context("invalid configuration")?;

    // A failed load is fatal: there is no retry and no empty fallback.
    log::info!("Loading salary dataset from {}", config.source);
    let dataset = match loader::load(&config.source, config.fetch_timeout) {
        Ok(dataset) => dataset,
        Err(e) => {
            let err = anyhow::Error::from(e)
                .context(format!("could not load dataset from {}", config.source));
            log::error!("Failed to load dataset: {err:#}");
            return Err(err);
        }
    };
    log::info!("Loaded {} salary records", dataset.len());
    if dataset.is_empty() {
        log::warn!("Dataset has no rows; every chart will show its placeholder");
    }

    let session = Session::new(dataset, config.aggregate);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Data Industry Salary Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryDashboardApp::new(session)))),
    )
    .map_err(|e| anyhow!("window error: {e}"))
}
