use serde::{Deserialize, Serialize};

use crate::utils::round_half_up;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AqiLevel {
    Good = 1,
    Fair = 2,
    Moderate = 3,
    Poor = 4,
    VeryPoor = 5,
}

impl AqiLevel {
    /// Classify a provider index; anything outside 1..=5 reads as Fair.
    pub fn from_index(aqi: i64) -> Self {
        match aqi {
            1 => AqiLevel::Good,
            2 => AqiLevel::Fair,
            3 => AqiLevel::Moderate,
            4 => AqiLevel::Poor,
            5 => AqiLevel::VeryPoor,
            _ => AqiLevel::Fair,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Fair => "Fair",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::Poor => "Poor",
            AqiLevel::VeryPoor => "Very Poor",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AqiLevel::Good => "Air quality is satisfactory",
            AqiLevel::Fair => "Air quality is acceptable",
            AqiLevel::Moderate => "Air quality is moderate",
            AqiLevel::Poor => "Air quality is poor",
            AqiLevel::VeryPoor => "Air quality is very poor",
        }
    }
}

/// Current air quality reading; pollutant concentrations in μg/m³.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    pub aqi: i64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub o3: f64,
    pub no2: f64,
}

impl AirQuality {
    pub fn level(&self) -> AqiLevel {
        AqiLevel::from_index(self.aqi)
    }

    /// Pollutants rounded for display, in the order PM2.5, PM10, O3, NO2
    pub fn rounded_components(&self) -> [(&'static str, i64); 4] {
        [
            ("PM2.5", round_half_up(self.pm2_5)),
            ("PM10", round_half_up(self.pm10)),
            ("O3", round_half_up(self.o3)),
            ("NO2", round_half_up(self.no2)),
        ]
    }

    pub fn summary(&self) -> String {
        let level = self.level();
        let components = self
            .rounded_components()
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Air Quality Index: {} ({})\n{}\n{}",
            self.aqi,
            level.status(),
            level.description(),
            components
        )
    }
}
