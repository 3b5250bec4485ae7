/// Aggregation windows
pub const DEFAULT_DAILY_DAYS: usize = 5;
pub const DEFAULT_HOURLY_WINDOW: usize = 8;
pub const SAMPLE_INTERVAL_SECS: i64 = 3 * 60 * 60;

/// Unit conversion
pub const MPS_TO_MPH: f64 = 2.236936;

/// Provider icon artwork
pub const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// File names
pub const CONFIG_FILE: &str = "forecast-aggregator";
pub const ENV_PREFIX: &str = "FORECAST_AGGREGATOR";
pub const FORECAST_EXTENSION: &str = "json";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Logging
pub const DEFAULT_LOG_FILTER: &str = "forecast_aggregator=info";

/// Output format names
pub const FORMAT_JSON: &str = "json";
pub const FORMAT_CSV: &str = "csv";
