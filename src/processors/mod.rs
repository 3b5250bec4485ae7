pub mod forecast_aggregator;
pub mod integrity_checker;
pub mod parallel_processor;

pub use forecast_aggregator::ForecastAggregator;
pub use integrity_checker::{IntegrityChecker, IntegrityReport, SampleViolation, ViolationType};
pub use parallel_processor::{CityForecast, ParallelProcessor};
