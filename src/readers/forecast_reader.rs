use crate::error::{ForecastError, Result};
use crate::models::{Forecast, ForecastLocation, ForecastSample};
use chrono::DateTime;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

// Wire format of the provider's 5-day/3-hour forecast. Missing numeric
// fields read as zero; fields not listed here are ignored.

#[derive(Debug, Deserialize)]
struct ForecastDocument {
    #[serde(default)]
    list: Vec<WireSample>,
    #[serde(default)]
    city: Option<WireCity>,
}

#[derive(Debug, Deserialize)]
struct WireSample {
    dt: i64,
    #[serde(default)]
    main: WireMain,
    #[serde(default)]
    wind: WireWind,
    #[serde(default)]
    weather: Vec<WireCondition>,
    #[serde(default)]
    pop: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireCondition {
    icon: String,
    description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireCity {
    name: String,
    country: String,
    timezone: i32,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

impl WireSample {
    fn into_sample(self) -> Result<ForecastSample> {
        if DateTime::from_timestamp(self.dt, 0).is_none() {
            return Err(ForecastError::InvalidFormat(format!(
                "Timestamp out of range: {}",
                self.dt
            )));
        }

        let condition = self.weather.into_iter().next().unwrap_or_default();

        Ok(ForecastSample::new(
            self.dt,
            self.main.temp_min,
            self.main.temp_max,
            self.main.temp,
            self.main.feels_like,
            whole_reading(self.dt, "humidity", self.main.humidity, 100.0),
            self.wind.speed,
            whole_reading(self.dt, "pressure", self.main.pressure, f64::from(u32::MAX)),
            self.pop,
            condition.icon,
            condition.description,
        ))
    }
}

/// Round a wire reading to a whole number. Values past `expected_max` are
/// kept for the integrity check; negatives clamp to zero.
fn whole_reading(dt: i64, field: &'static str, value: f64, expected_max: f64) -> u32 {
    let rounded = value.round();
    if !(0.0..=expected_max).contains(&rounded) {
        warn!(dt, field, value, "Reading outside expected range");
    }
    rounded.clamp(0.0, f64::from(u32::MAX)) as u32
}

impl From<WireCity> for ForecastLocation {
    fn from(city: WireCity) -> Self {
        Self {
            name: city.name,
            country: city.country,
            timezone_offset: city.timezone,
            sunrise: city.sunrise,
            sunset: city.sunset,
        }
    }
}

pub struct ForecastReader;

impl ForecastReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a forecast document from disk
    pub fn read_forecast(&self, path: &Path) -> Result<Forecast> {
        let file = File::open(path)?;
        let document: ForecastDocument = serde_json::from_reader(BufReader::new(file))?;
        let forecast = self.decode(document)?;

        debug!(
            path = %path.display(),
            samples = forecast.samples.len(),
            "Read forecast document"
        );
        Ok(forecast)
    }

    /// Parse a forecast document held in memory
    pub fn parse_forecast(&self, json: &str) -> Result<Forecast> {
        let document: ForecastDocument = serde_json::from_str(json)?;
        self.decode(document)
    }

    fn decode(&self, document: ForecastDocument) -> Result<Forecast> {
        let samples = document
            .list
            .into_iter()
            .map(WireSample::into_sample)
            .collect::<Result<Vec<_>>>()?;

        let location = document.city.map(ForecastLocation::from).unwrap_or_default();

        Ok(Forecast::new(location, samples))
    }
}

impl Default for ForecastReader {
    fn default() -> Self {
        Self::new()
    }
}
