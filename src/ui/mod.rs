//! Terminal rendering of the dashboard report

pub mod layout;
pub mod renderer;
pub mod terminal;

pub use terminal::{apply_key, run_ui};

use crate::config::Config;
use std::time::Duration;

/// Presentation settings taken from the configuration
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    /// Calendar year that year indicator 0 stands for
    pub base_year: i32,
    /// Show every season/month, absent ones as zero bars
    pub zero_fill: bool,
    /// Input poll interval
    pub tick: Duration,
}

impl ViewOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_year: config.base_year,
            zero_fill: config.zero_fill_categories,
            tick: Duration::from_millis(config.tick_ms),
        }
    }
}
