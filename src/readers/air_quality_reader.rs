use crate::error::{ForecastError, Result};
use crate::models::AirQuality;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct AirPollutionDocument {
    #[serde(default)]
    list: Vec<WireReading>,
}

#[derive(Debug, Deserialize)]
struct WireReading {
    #[serde(default)]
    main: WireIndex,
    #[serde(default)]
    components: WireComponents,
}

#[derive(Debug, Default, Deserialize)]
struct WireIndex {
    #[serde(default)]
    aqi: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireComponents {
    pm2_5: f64,
    pm10: f64,
    o3: f64,
    no2: f64,
}

pub struct AirQualityReader;

impl AirQualityReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_air_quality(&self, path: &Path) -> Result<AirQuality> {
        let file = File::open(path)?;
        let document: AirPollutionDocument = serde_json::from_reader(BufReader::new(file))?;
        let reading = self.decode(document)?;

        debug!(path = %path.display(), aqi = reading.aqi, "Read air quality document");
        Ok(reading)
    }

    pub fn parse_air_quality(&self, json: &str) -> Result<AirQuality> {
        let document: AirPollutionDocument = serde_json::from_str(json)?;
        self.decode(document)
    }

    /// The first reading is the current one
    fn decode(&self, document: AirPollutionDocument) -> Result<AirQuality> {
        let reading = document
            .list
            .into_iter()
            .next()
            .ok_or_else(|| ForecastError::MissingData("air quality reading".to_string()))?;

        let aqi = index_from_wire(reading.main.aqi);
        if !(1..=5).contains(&aqi) {
            warn!(aqi = reading.main.aqi, "Unknown air quality index, reading as Fair");
        }

        Ok(AirQuality {
            aqi,
            pm2_5: reading.components.pm2_5,
            pm10: reading.components.pm10,
            o3: reading.components.o3,
            no2: reading.components.no2,
        })
    }
}

/// Whole-number indices pass through; fractional ones are unknown.
fn index_from_wire(aqi: f64) -> i64 {
    if aqi.fract() == 0.0 {
        aqi as i64
    } else {
        0
    }
}

impl Default for AirQualityReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AqiLevel;

    #[test]
    fn test_parse_air_quality() {
        let json = r#"{
            "coord": {"lon": -9.13, "lat": 38.71},
            "list": [{
                "main": {"aqi": 3},
                "components": {"co": 201.94, "no2": 21.6, "o3": 68.66, "pm2_5": 9.3, "pm10": 14.2},
                "dt": 1704067200
            }]
        }"#;

        let reading = AirQualityReader::new().parse_air_quality(json).unwrap();
        assert_eq!(reading.level(), AqiLevel::Moderate);
        assert_eq!(reading.no2, 21.6);
        assert_eq!(reading.pm2_5, 9.3);
    }

    #[test]
    fn test_missing_components_default_to_zero() {
        let json = r#"{"list": [{"main": {"aqi": 1}, "components": {"pm10": 4.0}}]}"#;
        let reading = AirQualityReader::new().parse_air_quality(json).unwrap();
        assert_eq!(reading.pm10, 4.0);
        assert_eq!(reading.o3, 0.0);
    }

    #[test]
    fn test_empty_list_is_missing_data() {
        let result = AirQualityReader::new().parse_air_quality(r#"{"list": []}"#);
        assert!(matches!(result, Err(ForecastError::MissingData(_))));
    }

    #[test]
    fn test_out_of_range_index_reads_as_fair() {
        let reader = AirQualityReader::new();

        let high = reader
            .parse_air_quality(r#"{"list": [{"main": {"aqi": 300}, "components": {}}]}"#)
            .unwrap();
        assert_eq!(high.aqi, 300);
        assert_eq!(high.level(), AqiLevel::Fair);

        let zero = reader
            .parse_air_quality(r#"{"list": [{"main": {"aqi": 0}, "components": {}}]}"#)
            .unwrap();
        assert_eq!(zero.level(), AqiLevel::Fair);

        let negative = reader
            .parse_air_quality(r#"{"list": [{"main": {"aqi": -1}}]}"#)
            .unwrap();
        assert_eq!(negative.level(), AqiLevel::Fair);
    }

    #[test]
    fn test_float_and_missing_index() {
        let reader = AirQualityReader::new();

        let whole = reader
            .parse_air_quality(r#"{"list": [{"main": {"aqi": 2.0}, "components": {}}]}"#)
            .unwrap();
        assert_eq!(whole.aqi, 2);

        let fractional = reader
            .parse_air_quality(r#"{"list": [{"main": {"aqi": 4.5}}]}"#)
            .unwrap();
        assert_eq!(fractional.level(), AqiLevel::Fair);

        let no_main = reader
            .parse_air_quality(r#"{"list": [{"components": {"pm10": 3.0}}]}"#)
            .unwrap();
        assert_eq!(no_main.aqi, 0);
        assert_eq!(no_main.level(), AqiLevel::Fair);
        assert_eq!(no_main.pm10, 3.0);
    }
}
