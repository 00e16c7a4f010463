use anyhow::{Context, Result};

use launch_dash::app::DashboardApp;
use launch_dash::config::DashboardConfig;
use launch_dash::{data, serve};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::default();

    let dataset = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    if let Some(payload) = dataset.payload {
        log::info!(
            "Loaded {} launches from {} sites {:?}, payload {}..{} kg",
            dataset.len(),
            dataset.sites.len(),
            dataset.sites,
            payload.min,
            payload.max
        );
    }

    let app = DashboardApp::new(dataset, &config)?;
    serve::start(&app, &config.bind_addr)
}
