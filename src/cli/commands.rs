use crate::cli::args::{Cli, Commands};
use crate::config::AppConfig;
use crate::error::Result;
use crate::models::Forecast;
use crate::processors::{ForecastAggregator, IntegrityChecker, ParallelProcessor};
use crate::readers::{ConcurrentReader, ForecastReader};
use crate::utils::filename::{city_summary_filename, default_summary_filename};
use crate::utils::progress::ProgressReporter;
use crate::views::ForecastView;
use crate::writers::{OutputFormat, SummaryWriter};
use tracing::{info, warn};

pub async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let unit = cli.unit.unwrap_or(config.unit);
    let view = ForecastView::new(unit);
    let aggregator = config.aggregator();

    info!(unit = %unit, "Starting forecast aggregation");

    match cli.command {
        Commands::Daily {
            input,
            output_file,
            export,
            format,
            days,
            include_today,
        } => {
            let format: OutputFormat = format.parse()?;
            let forecast = ForecastReader::new().read_forecast(&input)?;

            let mut aggregator = aggregator;
            if let Some(days) = days {
                aggregator = aggregator.with_daily_days(days);
            }
            if include_today {
                aggregator = aggregator.with_skip_first_day(false);
            }

            let daily = aggregator.build_daily_forecast(&forecast.samples);

            println!("Daily forecast for {}", forecast.location.display_name());
            if daily.is_empty() {
                println!("No complete days in this forecast");
                return Ok(());
            }
            println!("\n{}", view.daily_table(&view.daily(&daily)));

            if export || output_file.is_some() {
                let path = output_file.unwrap_or_else(|| default_summary_filename(format.extension()));
                SummaryWriter::new()
                    .with_format(format)
                    .write_summaries(&daily, &path)?;
                println!("Summaries written to {}", path.display());
            }
        }

        Commands::Hourly { input, count } => {
            let forecast = ForecastReader::new().read_forecast(&input)?;
            let aggregator = match count {
                Some(count) => aggregator.with_hourly_window(count),
                None => aggregator,
            };

            print_hourly(&forecast, &aggregator, &view);
        }

        Commands::Day { input, date } => {
            let forecast = ForecastReader::new().read_forecast(&input)?;
            let bucket = aggregator.day_bucket(&forecast.samples, date)?;
            let summary = aggregator.summarize_day(&bucket)?;

            println!(
                "{} in {}",
                date.format("%A, %B %-d, %Y"),
                forecast.location.display_name()
            );
            println!("\n{}", view.daily_table(&view.daily(std::slice::from_ref(&summary))));
            println!("Complete breakdown ({} samples):", bucket.len());
            let rows = view.hourly(bucket.samples.iter().copied(), forecast.location.offset());
            println!("{}", view.hourly_table(&rows));
        }

        Commands::Dashboard {
            forecast,
            air_quality,
        } => {
            let progress = ProgressReporter::new_spinner("Loading forecast...", false);
            let data = ConcurrentReader::new()
                .read_dashboard(&forecast, air_quality.as_deref())
                .await?;
            progress.finish_with_message("Forecast loaded");

            println!("\n=== {} ===", data.forecast.location.display_name());
            if let Some(daylight) = data.forecast.location.daylight() {
                println!("{}", daylight);
            }
            print_hourly(&data.forecast, &aggregator, &view);

            let daily = aggregator.build_daily_forecast(&data.forecast.samples);
            println!("Coming days:");
            println!("{}", view.daily_table(&view.daily(&daily)));

            match data.air_quality {
                Some(reading) => println!("{}", reading.summary()),
                None if air_quality.is_some() => println!("Air quality unavailable"),
                None => {}
            }
        }

        Commands::Validate { input } => {
            println!("Validating forecast document...");
            println!("Input: {}", input.display());

            let forecast = ForecastReader::new().read_forecast(&input)?;
            let checker = IntegrityChecker::new();
            let report = checker.check_integrity(&forecast.samples);

            println!("\n{}", checker.generate_summary(&report));

            if report.is_clean() {
                println!("✅ All samples passed validation checks");
            } else {
                println!("⚠️  Found {} validation issues", report.violations.len());
            }
        }

        Commands::ProcessDirectory {
            input_dir,
            output_dir,
            format,
            max_workers,
        } => {
            let format: OutputFormat = format.parse()?;
            let workers = max_workers.unwrap_or(config.max_workers);

            println!("Processing forecasts in {}", input_dir.display());
            println!("Workers: {}", workers);

            let progress = ProgressReporter::new(0, "Reading forecasts...", false);
            let processor = ParallelProcessor::new(workers).with_aggregator(aggregator);
            let cities = processor.process_directory(&input_dir, Some(&progress))?;

            let writer = SummaryWriter::new().with_format(format);
            for city in &cities {
                println!(
                    "\n{} ({} days, {:.1}% valid samples)",
                    city.location.display_name(),
                    city.daily.len(),
                    city.integrity.valid_percentage()
                );
                if !city.integrity.is_clean() {
                    warn!(
                        file = %city.source.display(),
                        violations = city.integrity.violations.len(),
                        "Forecast has integrity problems"
                    );
                }
                println!("{}", view.daily_table(&view.daily(&city.daily)));

                if let Some(dir) = &output_dir {
                    let path = dir.join(city_summary_filename(&city.stem(), format.extension()));
                    writer.write_summaries(&city.daily, &path)?;
                }
            }

            if let Some(dir) = &output_dir {
                println!("Summaries written to {}", dir.display());
            }
            println!("Processing complete!");
        }
    }

    Ok(())
}

fn print_hourly(forecast: &Forecast, aggregator: &ForecastAggregator, view: &ForecastView) {
    let window = aggregator.select_hourly_window(&forecast.samples);
    let rows = view.hourly(window, forecast.location.offset());

    println!("Next {} forecasts:", rows.len());
    println!("{}", view.hourly_table(&rows));
}
