use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::ForecastSample;

/// All samples that fall on one UTC calendar day, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket<'a> {
    pub date: NaiveDate,
    pub samples: Vec<&'a ForecastSample>,
}

impl<'a> DayBucket<'a> {
    pub fn new(date: NaiveDate, samples: Vec<&'a ForecastSample>) -> Self {
        Self { date, samples }
    }

    /// Date key in "YYYY-MM-DD" form
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Day buckets keyed by date, iterated in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct DayBuckets<'a> {
    buckets: Vec<DayBucket<'a>>,
    index: HashMap<NaiveDate, usize>,
}

impl<'a> DayBuckets<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample to its day's bucket, opening the bucket on first sight of the date.
    pub fn push(&mut self, date: NaiveDate, sample: &'a ForecastSample) {
        match self.index.get(&date) {
            Some(&position) => self.buckets[position].samples.push(sample),
            None => {
                self.index.insert(date, self.buckets.len());
                self.buckets.push(DayBucket::new(date, vec![sample]));
            }
        }
    }

    pub fn get(&self, date: &NaiveDate) -> Option<&DayBucket<'a>> {
        self.index.get(date).map(|&position| &self.buckets[position])
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.buckets.iter().map(|b| b.date)
    }

    pub fn keys(&self) -> Vec<String> {
        self.buckets.iter().map(DayBucket::key).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DayBucket<'a>> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl<'a, 'b> IntoIterator for &'b DayBuckets<'a> {
    type Item = &'b DayBucket<'a>;
    type IntoIter = std::slice::Iter<'b, DayBucket<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

/// Aggregated statistics for one day, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    pub avg_humidity: i64,
    /// Mean wind rounded to whole m/s
    pub avg_wind_speed: f64,
    /// Unrounded mean wind in m/s, converted before rounding for display
    pub mean_wind_speed: f64,
    pub max_precip_probability: i64,
    pub icon: String,
}
