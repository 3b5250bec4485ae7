use chrono::{Datelike, Local};
use std::path::PathBuf;

use crate::utils::constants::DEFAULT_OUTPUT_DIR;

/// Default summary export path: output/forecast-summary-{YYMMDD}.{extension}
pub fn default_summary_filename(extension: &str) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100;

    let filename = format!(
        "forecast-summary-{:02}{:02}{:02}.{}",
        year,
        now.month(),
        now.day(),
        extension
    );
    PathBuf::from(DEFAULT_OUTPUT_DIR).join(filename)
}

/// Export path for one city's summaries inside a batch output directory
pub fn city_summary_filename(stem: &str, extension: &str) -> String {
    format!("{}-summary.{}", stem, extension)
}
