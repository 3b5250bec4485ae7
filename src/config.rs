use crate::error::Result;
use crate::models::Unit;
use crate::processors::ForecastAggregator;
use crate::utils::constants::{
    CONFIG_FILE, DEFAULT_DAILY_DAYS, DEFAULT_HOURLY_WINDOW, DEFAULT_LOG_FILTER, ENV_PREFIX,
};
use serde::Deserialize;
use std::path::Path;

/// Runtime settings: built-in defaults, then an optional TOML file, then
/// `FORECAST_AGGREGATOR_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    pub unit: Unit,
    pub daily_days: usize,
    pub hourly_window: usize,
    pub skip_first_day: bool,
    pub log_filter: String,
    pub max_workers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            unit: Unit::Metric,
            daily_days: DEFAULT_DAILY_DAYS,
            hourly_window: DEFAULT_HOURLY_WINDOW,
            skip_first_day: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            max_workers: num_cpus::get(),
        }
    }
}

impl AppConfig {
    /// Load configuration. An explicit path must exist; the default
    /// `forecast-aggregator.toml` in the working directory is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let file_source = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .set_default("unit", defaults.unit.as_str())?
            .set_default("daily_days", defaults.daily_days as u64)?
            .set_default("hourly_window", defaults.hourly_window as u64)?
            .set_default("skip_first_day", defaults.skip_first_day)?
            .set_default("log_filter", defaults.log_filter)?
            .set_default("max_workers", defaults.max_workers as u64)?
            .add_source(file_source)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    pub fn aggregator(&self) -> ForecastAggregator {
        ForecastAggregator::new()
            .with_daily_days(self.daily_days)
            .with_hourly_window(self.hourly_window)
            .with_skip_first_day(self.skip_first_day)
    }
}
