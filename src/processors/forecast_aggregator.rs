use crate::error::{ForecastError, Result};
use crate::models::{DayBucket, DayBuckets, DaySummary, ForecastSample};
use crate::utils::constants::{DEFAULT_DAILY_DAYS, DEFAULT_HOURLY_WINDOW};
use crate::utils::{mean, round_half_up};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

/// Turns a time-ordered run of 3-hour samples into day summaries and an hourly window.
///
/// Holds only window settings; every method is a pure function of its input.
#[derive(Debug, Clone, Copy)]
pub struct ForecastAggregator {
    daily_days: usize,
    hourly_window: usize,
    skip_first_day: bool,
}

impl ForecastAggregator {
    pub fn new() -> Self {
        Self {
            daily_days: DEFAULT_DAILY_DAYS,
            hourly_window: DEFAULT_HOURLY_WINDOW,
            skip_first_day: true,
        }
    }

    pub fn with_daily_days(mut self, daily_days: usize) -> Self {
        self.daily_days = daily_days;
        self
    }

    pub fn with_hourly_window(mut self, hourly_window: usize) -> Self {
        self.hourly_window = hourly_window;
        self
    }

    pub fn with_skip_first_day(mut self, skip_first_day: bool) -> Self {
        self.skip_first_day = skip_first_day;
        self
    }

    /// Bucket samples by UTC calendar day, keeping first-occurrence order of the days.
    pub fn group_by_day<'a>(&self, samples: &'a [ForecastSample]) -> DayBuckets<'a> {
        let mut buckets = DayBuckets::new();
        for sample in samples {
            buckets.push(sample.date(), sample);
        }

        debug!(
            samples = samples.len(),
            days = buckets.len(),
            "Grouped forecast samples by day"
        );
        buckets
    }

    /// Aggregate one day's samples. An empty bucket is a caller error.
    pub fn summarize_day(&self, bucket: &DayBucket<'_>) -> Result<DaySummary> {
        let first = bucket.samples.first().ok_or_else(|| {
            ForecastError::InvalidArgument(format!("Cannot summarize empty bucket for {}", bucket.date))
        })?;

        Ok(summarize(bucket.date, first, &bucket.samples))
    }

    /// Day summaries for the daily view: the partial first day is skipped and
    /// at most `daily_days` days follow. Short forecasts yield fewer entries.
    pub fn build_daily_forecast(&self, samples: &[ForecastSample]) -> Vec<DaySummary> {
        let buckets = self.group_by_day(samples);
        let skip = usize::from(self.skip_first_day);

        // Every bucket from group_by_day opens with the sample that created it
        let summaries: Vec<DaySummary> = buckets
            .iter()
            .skip(skip)
            .take(self.daily_days)
            .filter_map(|bucket| {
                bucket
                    .samples
                    .first()
                    .map(|first| summarize(bucket.date, first, &bucket.samples))
            })
            .collect();

        debug!(days = summaries.len(), "Built daily forecast");
        summaries
    }

    /// Leading samples covering the next day (8 × 3h by default), in input order.
    pub fn select_hourly_window<'a>(&self, samples: &'a [ForecastSample]) -> &'a [ForecastSample] {
        &samples[..self.hourly_window.min(samples.len())]
    }

    /// Samples for a single day, for a per-day breakdown.
    pub fn day_bucket<'a>(
        &self,
        samples: &'a [ForecastSample],
        date: NaiveDate,
    ) -> Result<DayBucket<'a>> {
        let buckets = self.group_by_day(samples);
        buckets
            .get(&date)
            .cloned()
            .ok_or(ForecastError::DayNotFound { date })
    }
}

impl Default for ForecastAggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn summarize(date: NaiveDate, first: &ForecastSample, samples: &[&ForecastSample]) -> DaySummary {
    let mut temp_min = first.temp_min;
    let mut temp_max = first.temp_max;
    let mut max_pop = first.precip_probability;

    for sample in samples {
        temp_min = temp_min.min(sample.temp_min);
        temp_max = temp_max.max(sample.temp_max);
        max_pop = max_pop.max(sample.precip_probability);
    }

    let avg_humidity = mean(samples.iter().map(|s| f64::from(s.humidity))).unwrap_or(0.0);
    let mean_wind = mean(samples.iter().map(|s| s.wind_speed)).unwrap_or(0.0);

    DaySummary {
        date,
        temp_min,
        temp_max,
        avg_humidity: round_half_up(avg_humidity),
        avg_wind_speed: round_half_up(mean_wind) as f64,
        mean_wind_speed: mean_wind,
        max_precip_probability: round_half_up(max_pop * 100.0),
        icon: representative_icon(samples),
    }
}

/// Most frequent icon; on a tie the icon that reached the count first keeps the lead.
fn representative_icon(samples: &[&ForecastSample]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut leader = samples.first().map(|s| s.icon.as_str()).unwrap_or_default();
    let mut leader_count = 0;

    for sample in samples {
        let count = counts.entry(sample.icon.as_str()).or_insert(0);
        *count += 1;

        if *count > leader_count {
            leader_count = *count;
            leader = sample.icon.as_str();
        }
    }

    leader.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ForecastSampleBuilder;
    use crate::utils::constants::SAMPLE_INTERVAL_SECS;

    // 2024-01-01T00:00:00Z
    const DAY_ONE: i64 = 1_704_067_200;

    fn sample(timestamp: i64, icon: &str) -> ForecastSample {
        ForecastSampleBuilder::new()
            .timestamp(timestamp)
            .temperatures(5.0, 10.0, 15.0)
            .humidity(60)
            .wind_speed(3.0)
            .condition(icon, "test")
            .build()
            .unwrap()
    }

    fn run(start: i64, count: usize) -> Vec<ForecastSample> {
        (0..count)
            .map(|i| sample(start + i as i64 * SAMPLE_INTERVAL_SECS, "01d"))
            .collect()
    }

    #[test]
    fn test_group_by_day_empty() {
        let aggregator = ForecastAggregator::new();
        let buckets = aggregator.group_by_day(&[]);
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_group_by_day_keys_in_first_occurrence_order() {
        let aggregator = ForecastAggregator::new();
        // Starts at 21:00 so the first day holds a single sample
        let samples = run(DAY_ONE + 21 * 3600, 10);
        let buckets = aggregator.group_by_day(&samples);

        assert_eq!(buckets.keys(), vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        let sizes: Vec<usize> = buckets.iter().map(DayBucket::len).collect();
        assert_eq!(sizes, vec![1, 8, 1]);
    }

    #[test]
    fn test_summarize_day_statistics() {
        let aggregator = ForecastAggregator::new();
        let samples = vec![
            ForecastSampleBuilder::new()
                .timestamp(DAY_ONE)
                .temperatures(2.0, 4.0, 6.0)
                .humidity(70)
                .wind_speed(2.0)
                .precip_probability(0.2)
                .condition("04d", "overcast clouds")
                .build()
                .unwrap(),
            ForecastSampleBuilder::new()
                .timestamp(DAY_ONE + SAMPLE_INTERVAL_SECS)
                .temperatures(-1.5, 3.0, 4.0)
                .humidity(75)
                .wind_speed(3.0)
                .precip_probability(0.67)
                .condition("10d", "light rain")
                .build()
                .unwrap(),
            ForecastSampleBuilder::new()
                .timestamp(DAY_ONE + 2 * SAMPLE_INTERVAL_SECS)
                .temperatures(1.0, 8.0, 9.5)
                .humidity(80)
                .wind_speed(4.0)
                .precip_probability(0.0)
                .condition("04d", "overcast clouds")
                .build()
                .unwrap(),
        ];

        let buckets = aggregator.group_by_day(&samples);
        let summary = aggregator.summarize_day(buckets.iter().next().unwrap()).unwrap();

        assert_eq!(summary.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(summary.temp_min, -1.5);
        assert_eq!(summary.temp_max, 9.5);
        assert_eq!(summary.avg_humidity, 75);
        assert_eq!(summary.avg_wind_speed, 3.0);
        assert_eq!(summary.max_precip_probability, 67);
        assert_eq!(summary.icon, "04d");
    }

    #[test]
    fn test_summarize_day_rounds_means_half_up() {
        let aggregator = ForecastAggregator::new();
        let samples = vec![
            ForecastSampleBuilder::new().timestamp(DAY_ONE).humidity(60).wind_speed(2.0).build().unwrap(),
            ForecastSampleBuilder::new()
                .timestamp(DAY_ONE + SAMPLE_INTERVAL_SECS)
                .humidity(61)
                .wind_speed(3.0)
                .build()
                .unwrap(),
        ];

        let buckets = aggregator.group_by_day(&samples);
        let summary = aggregator.summarize_day(buckets.iter().next().unwrap()).unwrap();

        // 60.5 -> 61 and 2.5 -> 3
        assert_eq!(summary.avg_humidity, 61);
        assert_eq!(summary.avg_wind_speed, 3.0);
    }

    #[test]
    fn test_summarize_empty_bucket_is_invalid_argument() {
        let aggregator = ForecastAggregator::new();
        let bucket = DayBucket::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), vec![]);
        assert!(matches!(
            aggregator.summarize_day(&bucket),
            Err(ForecastError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_icon_tie_goes_to_first_to_reach_count() {
        let icons = ["02d", "01d", "01d", "02d", "03d", "03d", "03d", "02d"];
        let samples: Vec<ForecastSample> = icons
            .iter()
            .enumerate()
            .map(|(i, icon)| sample(DAY_ONE + i as i64 * SAMPLE_INTERVAL_SECS, icon))
            .collect();
        let refs: Vec<&ForecastSample> = samples.iter().collect();

        // 03d reaches 3 before 02d does
        assert_eq!(representative_icon(&refs), "03d");
        // Up to index 3: 01d reaches 2 before 02d
        assert_eq!(representative_icon(&refs[..4]), "01d");
        assert_eq!(representative_icon(&refs[..1]), "02d");
    }

    #[test]
    fn test_build_daily_forecast_skips_first_day() {
        let aggregator = ForecastAggregator::new();
        let samples = run(DAY_ONE, 40);
        let daily = aggregator.build_daily_forecast(&samples);

        assert_eq!(daily.len(), 4);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(daily[3].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_build_daily_forecast_caps_at_window() {
        let aggregator = ForecastAggregator::new();
        // 7 distinct days: skip one, keep five
        let samples = run(DAY_ONE, 56);
        let daily = aggregator.build_daily_forecast(&samples);
        assert_eq!(daily.len(), 5);
        assert_eq!(daily[4].date, NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());
    }

    #[test]
    fn test_build_daily_forecast_single_day_is_empty() {
        let aggregator = ForecastAggregator::new();
        assert!(aggregator.build_daily_forecast(&run(DAY_ONE, 8)).is_empty());
        assert!(aggregator.build_daily_forecast(&[]).is_empty());
    }

    #[test]
    fn test_build_daily_forecast_without_skip() {
        let aggregator = ForecastAggregator::new().with_skip_first_day(false).with_daily_days(2);
        let daily = aggregator.build_daily_forecast(&run(DAY_ONE, 40));
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_select_hourly_window() {
        let aggregator = ForecastAggregator::new();
        let samples = run(DAY_ONE, 12);
        let window = aggregator.select_hourly_window(&samples);
        assert_eq!(window.len(), 8);
        assert_eq!(window, &samples[..8]);

        let short = run(DAY_ONE, 3);
        assert_eq!(aggregator.select_hourly_window(&short), short.as_slice());
        assert!(aggregator.select_hourly_window(&[]).is_empty());
    }

    #[test]
    fn test_day_bucket_lookup() {
        let aggregator = ForecastAggregator::new();
        let samples = run(DAY_ONE, 16);

        let bucket = aggregator
            .day_bucket(&samples, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
            .unwrap();
        assert_eq!(bucket.len(), 8);
        assert_eq!(bucket.key(), "2024-01-02");

        let missing = aggregator.day_bucket(&samples, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(matches!(missing, Err(ForecastError::DayNotFound { .. })));
    }

    #[test]
    fn test_daily_forecast_matches_per_day_summaries() {
        let aggregator = ForecastAggregator::new();
        // Starts at 15:00 so the skipped first day is partial
        let samples = run(DAY_ONE + 15 * 3600, 30);

        let daily = aggregator.build_daily_forecast(&samples);
        let expected: Vec<DaySummary> = aggregator
            .group_by_day(&samples)
            .iter()
            .skip(1)
            .take(5)
            .map(|bucket| aggregator.summarize_day(bucket).unwrap())
            .collect();

        assert_eq!(daily.len(), 4);
        assert_eq!(daily, expected);
    }

    #[test]
    fn test_summary_keeps_exact_mean_wind() {
        let aggregator = ForecastAggregator::new();
        let samples: Vec<ForecastSample> = [3.0, 3.5, 3.7]
            .iter()
            .enumerate()
            .map(|(i, &speed)| {
                ForecastSampleBuilder::new()
                    .timestamp(DAY_ONE + i as i64 * SAMPLE_INTERVAL_SECS)
                    .wind_speed(speed)
                    .build()
                    .unwrap()
            })
            .collect();

        let bucket = aggregator.day_bucket(&samples, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap();
        let summary = aggregator.summarize_day(&bucket).unwrap();

        assert_eq!(summary.avg_wind_speed, 3.0);
        assert!((summary.mean_wind_speed - 3.4).abs() < 1e-9);
    }
}
