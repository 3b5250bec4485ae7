use crate::error::{ForecastError, Result};
use crate::models::DaySummary;
use crate::utils::constants::{FORMAT_CSV, FORMAT_JSON};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => FORMAT_JSON,
            OutputFormat::Csv => FORMAT_CSV,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            FORMAT_JSON => Ok(OutputFormat::Json),
            FORMAT_CSV => Ok(OutputFormat::Csv),
            other => Err(ForecastError::InvalidArgument(format!(
                "Unsupported output format: {}",
                other
            ))),
        }
    }
}

pub struct SummaryWriter {
    format: OutputFormat,
}

impl SummaryWriter {
    pub fn new() -> Self {
        Self {
            format: OutputFormat::default(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Write day summaries, creating the parent directory if needed
    pub fn write_summaries(&self, summaries: &[DaySummary], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        match self.format {
            OutputFormat::Json => {
                let writer = BufWriter::new(File::create(path)?);
                serde_json::to_writer_pretty(writer, summaries)?;
            }
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_path(path)?;
                for summary in summaries {
                    writer.serialize(summary)?;
                }
                writer.flush()?;
            }
        }

        info!(
            path = %path.display(),
            days = summaries.len(),
            format = self.format.extension(),
            "Wrote day summaries"
        );
        Ok(())
    }

    pub fn read_json_summaries(&self, path: &Path) -> Result<Vec<DaySummary>> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

impl Default for SummaryWriter {
    fn default() -> Self {
        Self::new()
    }
}
