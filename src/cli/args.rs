use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::Unit;

#[derive(Parser)]
#[command(name = "forecast-aggregator")]
#[command(about = "Daily and hourly summaries of 5-day/3-hour weather forecasts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Configuration file [default: ./forecast-aggregator.toml]")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, value_parser = parse_unit, help = "Display units: metric or imperial")]
    pub unit: Option<Unit>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarise the coming days of a forecast document
    Daily {
        #[arg(short, long, help = "Forecast JSON document")]
        input: PathBuf,

        #[arg(
            short,
            long,
            help = "Export summaries to this file [default: output/forecast-summary-{YYMMDD}.{ext}]"
        )]
        output_file: Option<PathBuf>,

        #[arg(long, help = "Write the summaries to disk")]
        export: bool,

        #[arg(short, long, default_value = "json")]
        format: String,

        #[arg(long, help = "Number of days to summarise")]
        days: Option<usize>,

        #[arg(long, help = "Include the first (partial) day")]
        include_today: bool,
    },

    /// Show the next hours of a forecast document
    Hourly {
        #[arg(short, long, help = "Forecast JSON document")]
        input: PathBuf,

        #[arg(short, long, help = "Number of 3-hour samples to show")]
        count: Option<usize>,
    },

    /// Every sample of a single day
    Day {
        #[arg(short, long, help = "Forecast JSON document")]
        input: PathBuf,

        #[arg(short, long, help = "Day to show (YYYY-MM-DD, UTC)")]
        date: chrono::NaiveDate,
    },

    /// Hourly, daily and air quality views together
    Dashboard {
        #[arg(short, long, help = "Forecast JSON document")]
        forecast: PathBuf,

        #[arg(short, long, help = "Air pollution JSON document")]
        air_quality: Option<PathBuf>,
    },

    /// Check a forecast document for ordering and range problems
    Validate {
        #[arg(short, long, help = "Forecast JSON document")]
        input: PathBuf,
    },

    /// Summarise every forecast document in a directory
    ProcessDirectory {
        #[arg(short, long, help = "Directory of forecast JSON documents")]
        input_dir: PathBuf,

        #[arg(short, long, help = "Directory to write per-city summaries into")]
        output_dir: Option<PathBuf>,

        #[arg(short, long, default_value = "json")]
        format: String,

        #[arg(long, help = "Worker threads [default: from config]")]
        max_workers: Option<usize>,
    },
}

fn parse_unit(value: &str) -> Result<Unit, String> {
    value.parse::<Unit>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_daily_command() {
        let cli = Cli::parse_from([
            "forecast-aggregator",
            "--unit",
            "imperial",
            "daily",
            "--input",
            "forecast.json",
            "--days",
            "3",
        ]);

        assert_eq!(cli.unit, Some(Unit::Imperial));
        match cli.command {
            Commands::Daily { input, days, include_today, .. } => {
                assert_eq!(input, PathBuf::from("forecast.json"));
                assert_eq!(days, Some(3));
                assert!(!include_today);
            }
            _ => panic!("expected daily command"),
        }
    }

    #[test]
    fn test_rejects_unknown_unit() {
        let result = Cli::try_parse_from(["forecast-aggregator", "-u", "kelvin", "hourly", "-i", "f.json"]);
        assert!(result.is_err());
    }
}
