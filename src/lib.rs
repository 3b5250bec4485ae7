pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod views;
pub mod writers;

pub use error::{ForecastError, Result};
pub use models::{convert_temperature, DaySummary, ForecastSample, Unit};
pub use processors::ForecastAggregator;
