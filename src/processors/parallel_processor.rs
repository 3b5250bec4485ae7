use crate::error::{ForecastError, Result};
use crate::models::{DaySummary, ForecastLocation};
use crate::processors::{ForecastAggregator, IntegrityChecker, IntegrityReport};
use crate::readers::ForecastReader;
use crate::utils::constants::FORECAST_EXTENSION;
use crate::utils::progress::ProgressReporter;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// Aggregation result for one forecast document
#[derive(Debug)]
pub struct CityForecast {
    pub source: PathBuf,
    pub location: ForecastLocation,
    pub daily: Vec<DaySummary>,
    pub integrity: IntegrityReport,
}

impl CityForecast {
    /// File stem of the source document, used to name exports
    pub fn stem(&self) -> String {
        self.source
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "forecast".to_string())
    }
}

pub struct ParallelProcessor {
    max_workers: usize,
    aggregator: ForecastAggregator,
}

impl ParallelProcessor {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
            aggregator: ForecastAggregator::new(),
        }
    }

    pub fn with_aggregator(mut self, aggregator: ForecastAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Aggregate every forecast document in a directory on a worker pool.
    /// Results come back sorted by file name.
    pub fn process_directory(
        &self,
        input_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<CityForecast>> {
        let files = find_forecast_files(input_dir)?;
        if files.is_empty() {
            return Err(ForecastError::MissingData(format!(
                "No .{} forecast files in {}",
                FORECAST_EXTENSION,
                input_dir.display()
            )));
        }

        if let Some(p) = progress {
            p.set_length(files.len() as u64);
            p.set_message(&format!("Aggregating {} forecasts...", files.len()));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ForecastError::WorkerPool(e.to_string()))?;

        let processed_count = AtomicUsize::new(0);

        let results: Result<Vec<CityForecast>> = pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let result = self.process_file(path);

                    let count = processed_count.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(p) = progress {
                        p.update(count as u64);
                    }

                    result
                })
                .collect()
        });

        let results = results?;

        if let Some(p) = progress {
            p.finish_with_message(&format!("Aggregated {} forecasts", results.len()));
        }
        info!(files = results.len(), dir = %input_dir.display(), "Processed forecast directory");

        Ok(results)
    }

    /// Read, check and aggregate a single document
    pub fn process_file(&self, path: &Path) -> Result<CityForecast> {
        let forecast = ForecastReader::new().read_forecast(path)?;
        let integrity = IntegrityChecker::new().check_integrity(&forecast.samples);
        let daily = self.aggregator.build_daily_forecast(&forecast.samples);

        Ok(CityForecast {
            source: path.to_path_buf(),
            location: forecast.location,
            daily,
            integrity,
        })
    }
}

impl Default for ParallelProcessor {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

fn find_forecast_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_forecast = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(FORECAST_EXTENSION));

        if is_forecast {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
