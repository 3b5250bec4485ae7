use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ForecastError, Result};
use crate::utils::round_half_up;

/// One 3-hour forecast data point, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ForecastSample {
    pub timestamp: i64,

    pub temp_min: f64,
    pub temp_max: f64,
    pub temp: f64,
    pub feels_like: f64,

    #[validate(range(min = 0, max = 100))]
    pub humidity: u32,

    pub wind_speed: f64,
    pub pressure: u32,

    #[validate(range(min = 0.0, max = 1.0))]
    pub precip_probability: f64,

    pub icon: String,
    pub description: String,
}

impl ForecastSample {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        timestamp: i64,
        temp_min: f64,
        temp_max: f64,
        temp: f64,
        feels_like: f64,
        humidity: u32,
        wind_speed: f64,
        pressure: u32,
        precip_probability: f64,
        icon: String,
        description: String,
    ) -> Self {
        Self {
            timestamp,
            temp_min,
            temp_max,
            temp,
            feels_like,
            humidity,
            wind_speed,
            pressure,
            precip_probability,
            icon,
            description,
        }
    }

    /// Sample time in UTC. Timestamps outside chrono's range fall back to the epoch;
    /// readers reject those before they get here.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.timestamp, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Calendar day of the sample, split at UTC midnight
    pub fn date(&self) -> NaiveDate {
        self.datetime().date_naive()
    }

    pub fn precip_percent(&self) -> i64 {
        round_half_up(self.precip_probability * 100.0)
    }

    pub fn has_finite_temperatures(&self) -> bool {
        [self.temp_min, self.temp_max, self.temp, self.feels_like]
            .iter()
            .all(|t| t.is_finite())
    }
}

pub struct ForecastSampleBuilder {
    timestamp: Option<i64>,
    temp_min: f64,
    temp_max: f64,
    temp: f64,
    feels_like: f64,
    humidity: u32,
    wind_speed: f64,
    pressure: u32,
    precip_probability: f64,
    icon: String,
    description: String,
}

impl Default for ForecastSampleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastSampleBuilder {
    pub fn new() -> Self {
        Self {
            timestamp: None,
            temp_min: 0.0,
            temp_max: 0.0,
            temp: 0.0,
            feels_like: 0.0,
            humidity: 0,
            wind_speed: 0.0,
            pressure: 0,
            precip_probability: 0.0,
            icon: String::new(),
            description: String::new(),
        }
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets min, current and max temperature; feels-like follows the current value.
    pub fn temperatures(mut self, min: f64, temp: f64, max: f64) -> Self {
        self.temp_min = min;
        self.temp = temp;
        self.temp_max = max;
        self.feels_like = temp;
        self
    }

    pub fn feels_like(mut self, feels_like: f64) -> Self {
        self.feels_like = feels_like;
        self
    }

    pub fn humidity(mut self, humidity: u32) -> Self {
        self.humidity = humidity;
        self
    }

    pub fn wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = wind_speed;
        self
    }

    pub fn pressure(mut self, pressure: u32) -> Self {
        self.pressure = pressure;
        self
    }

    pub fn precip_probability(mut self, probability: f64) -> Self {
        self.precip_probability = probability;
        self
    }

    pub fn condition(mut self, icon: &str, description: &str) -> Self {
        self.icon = icon.to_string();
        self.description = description.to_string();
        self
    }

    pub fn build(self) -> Result<ForecastSample> {
        let timestamp = self
            .timestamp
            .ok_or_else(|| ForecastError::MissingData("timestamp".to_string()))?;

        let sample = ForecastSample::new(
            timestamp,
            self.temp_min,
            self.temp_max,
            self.temp,
            self.feels_like,
            self.humidity,
            self.wind_speed,
            self.pressure,
            self.precip_probability,
            self.icon,
            self.description,
        );

        sample.validate()?;
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_splits_at_utc_midnight() {
        // 2024-03-09T23:59:59Z and 2024-03-10T00:00:00Z
        let before = ForecastSampleBuilder::new().timestamp(1_710_028_799).build().unwrap();
        let after = ForecastSampleBuilder::new().timestamp(1_710_028_800).build().unwrap();

        assert_eq!(before.date(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(after.date(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn test_builder_requires_timestamp() {
        let result = ForecastSampleBuilder::new().temperatures(1.0, 2.0, 3.0).build();
        assert!(matches!(result, Err(ForecastError::MissingData(_))));
    }

    #[test]
    fn test_builder_rejects_out_of_range_fields() {
        let humid = ForecastSampleBuilder::new().timestamp(0).humidity(140).build();
        assert!(matches!(humid, Err(ForecastError::Validation(_))));

        let pop = ForecastSampleBuilder::new()
            .timestamp(0)
            .precip_probability(1.5)
            .build();
        assert!(matches!(pop, Err(ForecastError::Validation(_))));
    }

    #[test]
    fn test_precip_percent_rounds_half_up() {
        let sample = ForecastSampleBuilder::new()
            .timestamp(0)
            .precip_probability(0.125)
            .build()
            .unwrap();
        assert_eq!(sample.precip_percent(), 13);
    }
}
