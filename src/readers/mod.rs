pub mod air_quality_reader;
pub mod concurrent_reader;
pub mod forecast_reader;

pub use air_quality_reader::AirQualityReader;
pub use concurrent_reader::{ConcurrentReader, DashboardData};
pub use forecast_reader::ForecastReader;
