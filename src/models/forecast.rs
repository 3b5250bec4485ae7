use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ForecastSample;

/// Where a forecast applies, as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastLocation {
    pub name: String,
    pub country: String,
    /// Shift from UTC in seconds
    pub timezone_offset: i32,
    /// Unix seconds
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

impl ForecastLocation {
    /// Local clock offset; offsets chrono rejects (beyond ±24h) fall back to UTC.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.timezone_offset).unwrap_or_else(|| Utc.fix())
    }

    /// "Sunrise 07:54 · Sunset 17:26" on the location's clock, when both are known
    pub fn daylight(&self) -> Option<String> {
        let offset = self.offset();
        let local = |timestamp: i64| {
            DateTime::from_timestamp(timestamp, 0)
                .map(|t| t.with_timezone(&offset).format("%H:%M").to_string())
        };

        let sunrise = local(self.sunrise?)?;
        let sunset = local(self.sunset?)?;
        Some(format!("Sunrise {} · Sunset {}", sunrise, sunset))
    }

    pub fn display_name(&self) -> String {
        match (self.name.is_empty(), self.country.is_empty()) {
            (true, _) => "Unknown location".to_string(),
            (false, true) => self.name.clone(),
            (false, false) => format!("{}, {}", self.name, self.country),
        }
    }
}

/// A decoded forecast document: location plus time-ordered samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub location: ForecastLocation,
    pub samples: Vec<ForecastSample>,
}

impl Forecast {
    pub fn new(location: ForecastLocation, samples: Vec<ForecastSample>) -> Self {
        Self { location, samples }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let mut location = ForecastLocation::default();
        assert_eq!(location.display_name(), "Unknown location");

        location.name = "Lisbon".to_string();
        assert_eq!(location.display_name(), "Lisbon");

        location.country = "PT".to_string();
        assert_eq!(location.display_name(), "Lisbon, PT");
    }

    #[test]
    fn test_offset_falls_back_to_utc() {
        let location = ForecastLocation {
            timezone_offset: 3600,
            ..Default::default()
        };
        assert_eq!(location.offset().local_minus_utc(), 3600);

        let bogus = ForecastLocation {
            timezone_offset: 100_000,
            ..Default::default()
        };
        assert_eq!(bogus.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_daylight_on_local_clock() {
        // 2024-01-01 07:54:40Z and 17:26:40Z
        let mut location = ForecastLocation {
            timezone_offset: 3600,
            sunrise: Some(1_704_095_680),
            sunset: Some(1_704_130_000),
            ..Default::default()
        };
        assert_eq!(location.daylight().as_deref(), Some("Sunrise 08:54 · Sunset 18:26"));

        location.sunset = None;
        assert_eq!(location.daylight(), None);
    }
}
