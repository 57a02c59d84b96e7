use std::env;
use std::path::PathBuf;

/// Input backend for the ride table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Csv,
    Sqlite,
}

impl BackendType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Some(BackendType::Csv),
            "sqlite" | "db" => Some(BackendType::Sqlite),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendType::Csv => "csv",
            BackendType::Sqlite => "sqlite",
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingValue(String),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingValue(flag) => write!(f, "Missing value for {}", flag),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub backend: BackendType,
    /// Calendar year that year indicator 0 stands for
    pub base_year: i32,
    /// Show absent seasons/months as explicit zero bars instead of omitting them
    pub zero_fill_categories: bool,
    /// UI input poll interval in milliseconds
    pub tick_ms: u64,
    /// Log filter directives, `info` when unset
    pub rust_log: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `RIDEFLOW_DATA_PATH` (default: dashboard/cleaned_main_data.csv)
    /// - `RIDEFLOW_BACKEND` (csv | sqlite, default: csv)
    /// - `RIDEFLOW_BASE_YEAR` (default: 2011)
    /// - `RIDEFLOW_ZERO_FILL` (default: false)
    /// - `RIDEFLOW_TICK_MS` (default: 250)
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_path = env::var("RIDEFLOW_DATA_PATH")
            .unwrap_or_else(|_| "dashboard/cleaned_main_data.csv".to_string())
            .into();

        let backend = match env::var("RIDEFLOW_BACKEND") {
            Ok(s) => BackendType::from_str(&s).ok_or_else(|| {
                ConfigError::InvalidValue(format!("RIDEFLOW_BACKEND must be csv or sqlite, got '{}'", s))
            })?,
            Err(_) => BackendType::Csv,
        };

        let base_year = match env::var("RIDEFLOW_BASE_YEAR") {
            Ok(s) => s.trim().parse::<i32>().map_err(|_| {
                ConfigError::InvalidValue(format!("RIDEFLOW_BASE_YEAR must be a year, got '{}'", s))
            })?,
            Err(_) => 2011,
        };

        let zero_fill_categories = match env::var("RIDEFLOW_ZERO_FILL") {
            Ok(s) => parse_switch(&s).ok_or_else(|| {
                ConfigError::InvalidValue(format!("RIDEFLOW_ZERO_FILL must be true or false, got '{}'", s))
            })?,
            Err(_) => false,
        };

        let tick_ms = env::var("RIDEFLOW_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(250);

        let rust_log = env::var("RUST_LOG").ok();

        Ok(Self {
            data_path,
            backend,
            base_year,
            zero_fill_categories,
            tick_ms,
            rust_log,
        })
    }

    /// Apply `--backend <csv|sqlite>` and `--data <path>` overrides
    pub fn apply_args(&mut self, args: &[String]) -> Result<(), ConfigError> {
        if let Some(value) = flag_value(args, "--backend")? {
            self.backend = BackendType::from_str(value).ok_or_else(|| {
                ConfigError::InvalidValue(format!("--backend must be csv or sqlite, got '{}'", value))
            })?;
        }

        if let Some(value) = flag_value(args, "--data")? {
            self.data_path = PathBuf::from(value);
        }

        Ok(())
    }

    /// env_logger filter: `RUST_LOG` when set, otherwise `info`
    pub fn log_filter(&self) -> &str {
        self.rust_log
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("info")
    }
}

/// `true`/`false` switch, also accepting `1`/`0`, `yes`/`no`, `on`/`off`
fn parse_switch(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Value following `flag` in `args`, if the flag is present
pub fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>, ConfigError> {
    match args.iter().position(|x| x == flag) {
        Some(idx) => args
            .get(idx + 1)
            .map(|s| Some(s.as_str()))
            .ok_or_else(|| ConfigError::MissingValue(flag.to_string())),
        None => Ok(None),
    }
}
