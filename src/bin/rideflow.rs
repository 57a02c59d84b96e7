//! RideFlow - interactive bike-share dashboard
//!
//! Loads the ride table once, then redraws every aggregate view for the
//! selected date range as the range changes.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin rideflow -- --data dashboard/cleaned_main_data.csv
//! cargo run --release --bin rideflow -- --backend sqlite --data data/rides.db
//! ```
//!
//! ## Environment Variables
//!
//! - RIDEFLOW_DATA_PATH - Ride table location (default: dashboard/cleaned_main_data.csv)
//! - RIDEFLOW_BACKEND - csv | sqlite (default: csv)
//! - RIDEFLOW_BASE_YEAR - Calendar year of year indicator 0 (default: 2011)
//! - RIDEFLOW_ZERO_FILL - Show absent seasons/months as zero bars (default: false)
//! - RIDEFLOW_TICK_MS - Input poll interval (default: 250)
//! - RUST_LOG - Logging level (optional, default: info)

use rideflow::config::Config;
use rideflow::dataset::Dataset;
use rideflow::state::DashboardState;
use rideflow::ui::{self, ViewOptions};
use std::env;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let mut config = Config::from_env()?;

    // Logs go to stderr; the alternate screen hides them while the UI runs
    env_logger::Builder::new()
        .parse_filters(config.log_filter())
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    config.apply_args(&args)?;

    log::info!("🚲 Starting RideFlow dashboard...");
    log::info!("📊 Configuration:");
    log::info!("   Data: {}", config.data_path.display());
    log::info!("   Backend: {}", config.backend.as_str());
    log::info!("   Base year: {}", config.base_year);
    log::info!("   Zero-fill categories: {}", config.zero_fill_categories);

    let dataset = match Dataset::load(config.backend, &config.data_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("❌ Failed to load ride table: {}", e);
            return Err(e.into());
        }
    };

    log::info!(
        "✅ {} rows, {} → {}",
        dataset.len(),
        dataset.min_date(),
        dataset.max_date()
    );

    let mut state = DashboardState::new(Arc::new(dataset));
    let options = ViewOptions::from_config(&config);

    if let Err(e) = ui::run_ui(&mut state, &options) {
        log::error!("UI error: {}", e);
        return Err(e);
    }

    log::info!("UI exited after {} report rebuilds", state.recomputations());
    Ok(())
}
