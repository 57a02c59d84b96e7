//! RideFlow Report - headless rendering of the dashboard views
//!
//! Prints every aggregate for one date range as text tables, or as a single
//! JSON document with `--json`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin rideflow_report -- --start 2011-03-01 --end 2011-05-31
//! cargo run --release --bin rideflow_report -- --backend sqlite --data data/rides.db --json
//! ```
//!
//! `--start` / `--end` default to the first / last date in the table and must
//! lie inside it. Same environment variables as `rideflow`.

use rideflow::config::{flag_value, Config, ConfigError};
use rideflow::dataset::{DateRange, Dataset};
use rideflow::loader::backend::parse_date;
use rideflow::pipeline::Report;
use rideflow::ui::renderer::{format_count, format_hour, format_number, format_percent, user_totals};
use chrono::NaiveDate;
use std::env;

fn date_arg(args: &[String], flag: &str) -> Result<Option<NaiveDate>, ConfigError> {
    match flag_value(args, flag)? {
        Some(value) => parse_date(value)
            .map(Some)
            .ok_or_else(|| ConfigError::InvalidValue(format!("{} must be a date, got '{}'", flag, value))),
        None => Ok(None),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let mut config = Config::from_env()?;

    env_logger::Builder::new()
        .parse_filters(config.log_filter())
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    config.apply_args(&args)?;
    let as_json = args.iter().any(|a| a == "--json");

    let dataset = match Dataset::load(config.backend, &config.data_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("❌ Failed to load ride table: {}", e);
            return Err(e.into());
        }
    };

    let start = date_arg(&args, "--start")?.unwrap_or_else(|| dataset.min_date());
    let end = date_arg(&args, "--end")?.unwrap_or_else(|| dataset.max_date());
    let range = DateRange::within(start, end, &dataset)?;

    log::info!("📈 Building report for {}", range);
    let report = Report::build(dataset.records(), range);

    if as_json {
        let doc = report.to_json(config.zero_fill_categories, config.base_year);
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print_tables(&report, &config);
    }

    Ok(())
}

fn print_tables(report: &Report, config: &Config) {
    println!("Bike Sharing Report  {}  ({} rows)", report.range, format_count(report.row_count as u64));
    println!();

    if report.is_empty() {
        println!("No data for the selected date range");
        return;
    }

    let share = report.share();
    let shares = [Some(share.casual), Some(share.registered), None];
    println!("Users");
    for ((label, value), fraction) in user_totals(&report.summary).into_iter().zip(shares) {
        let percent = fraction.map(format_percent).unwrap_or_default();
        println!("  {:<18} {:>12} {:>8}", label, format_count(value), percent);
    }
    println!();

    println!("By year");
    for y in &report.yearly {
        println!(
            "  {:<12} {:>12} {:>12}",
            y.calendar_year(config.base_year),
            format_count(y.casual),
            format_count(y.registered)
        );
    }
    println!();

    println!("Monthly trend");
    for p in &report.trend {
        println!(
            "  {:<12} {:>12} {:>12} {:>12}",
            p.month_year.to_string(),
            format_count(p.casual),
            format_count(p.registered),
            format_count(p.total)
        );
    }
    println!();

    println!("By season");
    for entry in report.seasonal.arrange(config.zero_fill_categories) {
        println!("  {:<12} {:>12}", entry.category.to_string(), format_count(entry.total));
    }
    println!();

    println!("By month");
    for entry in report.monthly.arrange(config.zero_fill_categories) {
        println!("  {:<12} {:>12}", entry.category.to_string(), format_count(entry.total));
    }
    println!();

    println!("Hourly averages");
    for h in &report.hourly {
        let marker = if report.peak_hours.contains(&h.hour) { " *" } else { "" };
        println!(
            "  {:<6} {:>10} {:>10} {:>10}{}",
            format_hour(h.hour),
            format_number(h.casual_mean),
            format_number(h.registered_mean),
            format_number(h.total),
            marker
        );
    }
    println!();

    let peaks: Vec<String> = report.peak_hours.iter().map(|h| format_hour(*h)).collect();
    if peaks.is_empty() {
        println!("Peak hours: none");
    } else {
        println!("Peak hours: {}", peaks.join(", "));
    }
}
