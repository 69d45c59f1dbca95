// Availability Grid
// Main entry point

use anyhow::{Context, Result};
use availability_grid::services::config::AppConfig;
use availability_grid::services::database::Database;
use availability_grid::ui_egui::AvailabilityApp;
use chrono::Local;

fn main() -> Result<()> {
    env_logger::init();

    log::info!("Starting Availability Grid");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load config: {:#}, using defaults", e);
            AppConfig::default()
        }
    };

    let database = open_database(&config)?;
    let auth = Box::new(config.auth());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Availability")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Availability Grid",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(AvailabilityApp::new(
                database,
                auth,
                Local::now().date_naive(),
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Window closed with error: {}", e))
}

fn open_database(config: &AppConfig) -> Result<Database> {
    let db_path = config.resolve_database_path();
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
    }

    let db = Database::new(&db_path.to_string_lossy())?;
    db.initialize_schema()
        .context("Failed to initialize database schema")?;
    log::info!("Using database at {}", db_path.display());
    Ok(db)
}
