use crate::error::Result;
use crate::models::{AirQuality, Forecast};
use crate::readers::{AirQualityReader, ForecastReader};
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::warn;

/// Everything the dashboard needs for one location
#[derive(Debug)]
pub struct DashboardData {
    pub forecast: Forecast,
    pub air_quality: Option<AirQuality>,
}

pub struct ConcurrentReader;

impl ConcurrentReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the forecast and, when given, the air quality document side by side.
    ///
    /// A forecast failure fails the call. An unreadable air quality document is
    /// logged and left out so the forecast can still be shown.
    pub async fn read_dashboard(
        &self,
        forecast_path: &Path,
        air_quality_path: Option<&Path>,
    ) -> Result<DashboardData> {
        let forecast_path = forecast_path.to_path_buf();
        let forecast_handle: JoinHandle<Result<Forecast>> = tokio::task::spawn_blocking(move || {
            ForecastReader::new().read_forecast(&forecast_path)
        });

        let air_quality_handle: JoinHandle<Option<AirQuality>> = match air_quality_path {
            Some(path) => {
                let path: PathBuf = path.to_path_buf();
                tokio::task::spawn_blocking(move || {
                    AirQualityReader::new()
                        .read_air_quality(&path)
                        .inspect_err(|e| {
                            warn!(path = %path.display(), error = %e, "Air quality unavailable");
                        })
                        .ok()
                })
            }
            None => tokio::spawn(async { None }),
        };

        let (forecast, air_quality) = tokio::try_join!(forecast_handle, air_quality_handle)?;

        Ok(DashboardData {
            forecast: forecast?,
            air_quality,
        })
    }
}

impl Default for ConcurrentReader {
    fn default() -> Self {
        Self::new()
    }
}
