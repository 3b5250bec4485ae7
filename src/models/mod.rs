pub mod air_quality;
pub mod forecast;
pub mod sample;
pub mod summary;
pub mod unit;

pub use air_quality::{AirQuality, AqiLevel};
pub use forecast::{Forecast, ForecastLocation};
pub use sample::{ForecastSample, ForecastSampleBuilder};
pub use summary::{DayBucket, DayBuckets, DaySummary};
pub use unit::{convert_temperature, convert_wind_speed, Unit};
