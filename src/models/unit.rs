use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ForecastError;
use crate::utils::constants::MPS_TO_MPH;

/// Display unit system. Forecast data is always held in metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
}

impl Unit {
    pub fn temperature_label(&self) -> &'static str {
        match self {
            Unit::Metric => "°C",
            Unit::Imperial => "°F",
        }
    }

    pub fn wind_speed_label(&self) -> &'static str {
        match self {
            Unit::Metric => "m/s",
            Unit::Imperial => "mph",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "celsius" | "c" => Ok(Unit::Metric),
            "imperial" | "fahrenheit" | "f" => Ok(Unit::Imperial),
            other => Err(ForecastError::InvalidArgument(format!(
                "Unknown unit system: '{}'",
                other
            ))),
        }
    }
}

/// Convert a temperature between unit systems. No rounding is applied.
pub fn convert_temperature(value: f64, from: Unit, to: Unit) -> f64 {
    match (from, to) {
        (Unit::Metric, Unit::Imperial) => value * 9.0 / 5.0 + 32.0,
        (Unit::Imperial, Unit::Metric) => (value - 32.0) * 5.0 / 9.0,
        _ => value,
    }
}

/// Convert a wind speed between m/s and mph. No rounding is applied.
pub fn convert_wind_speed(value: f64, from: Unit, to: Unit) -> f64 {
    match (from, to) {
        (Unit::Metric, Unit::Imperial) => value * MPS_TO_MPH,
        (Unit::Imperial, Unit::Metric) => value / MPS_TO_MPH,
        _ => value,
    }
}
