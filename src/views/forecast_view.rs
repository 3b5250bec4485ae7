//! Display-time conversion of forecast data.
//!
//! Stored data stays metric; these rows carry values already converted to the
//! requested unit system and rounded the way they are shown.

use crate::models::{convert_temperature, convert_wind_speed, DaySummary, ForecastSample, Unit};
use crate::utils::constants::ICON_BASE_URL;
use crate::utils::round_half_up;
use chrono::{FixedOffset, Timelike};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyDisplay {
    pub date: String,
    pub weekday: String,
    pub temp_max: i64,
    pub temp_min: i64,
    pub humidity: i64,
    pub wind_speed: i64,
    pub precip_percent: i64,
    pub icon: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyDisplay {
    pub time: String,
    pub temp: i64,
    pub feels_like: i64,
    pub humidity: u32,
    pub wind_speed: f64,
    pub precip_percent: i64,
    pub pressure: u32,
    pub icon: String,
    pub icon_url: String,
    pub description: String,
}

pub struct ForecastView {
    unit: Unit,
}

impl ForecastView {
    pub fn new(unit: Unit) -> Self {
        Self { unit }
    }

    /// Temperature for display, rounded half-up
    pub fn temperature(&self, celsius: f64) -> i64 {
        round_half_up(convert_temperature(celsius, Unit::Metric, self.unit))
    }

    /// Wind speed for display, to one decimal place
    pub fn wind_speed(&self, metres_per_second: f64) -> f64 {
        let converted = convert_wind_speed(metres_per_second, Unit::Metric, self.unit);
        round_half_up(converted * 10.0) as f64 / 10.0
    }

    pub fn daily(&self, summaries: &[DaySummary]) -> Vec<DailyDisplay> {
        summaries
            .iter()
            .map(|summary| DailyDisplay {
                date: summary.date.format("%Y-%m-%d").to_string(),
                weekday: summary.date.format("%A").to_string(),
                temp_max: self.temperature(summary.temp_max),
                temp_min: self.temperature(summary.temp_min),
                humidity: summary.avg_humidity,
                wind_speed: round_half_up(convert_wind_speed(
                    summary.mean_wind_speed,
                    Unit::Metric,
                    self.unit,
                )),
                precip_percent: summary.max_precip_probability,
                icon: summary.icon.clone(),
                icon_url: icon_url(&summary.icon),
            })
            .collect()
    }

    /// Hour rows labelled on the location's clock
    pub fn hourly<'a, I>(&self, samples: I, offset: FixedOffset) -> Vec<HourlyDisplay>
    where
        I: IntoIterator<Item = &'a ForecastSample>,
    {
        samples
            .into_iter()
            .map(|sample| HourlyDisplay {
                time: hour_label(sample, offset),
                temp: self.temperature(sample.temp),
                feels_like: self.temperature(sample.feels_like),
                humidity: sample.humidity,
                wind_speed: self.wind_speed(sample.wind_speed),
                precip_percent: sample.precip_percent(),
                pressure: sample.pressure,
                icon: sample.icon.clone(),
                icon_url: icon_url(&sample.icon),
                description: sample.description.clone(),
            })
            .collect()
    }

    pub fn daily_table(&self, rows: &[DailyDisplay]) -> String {
        let mut table = format!(
            "{:<10} {:<12} {:>6} {:>6} {:>9} {:>9} {:>6}  {}\n",
            "Day",
            "Date",
            "High",
            "Low",
            "Humidity",
            "Wind",
            "Rain",
            "Icon"
        );

        for row in rows {
            table.push_str(&format!(
                "{:<10} {:<12} {:>5}° {:>5}° {:>8}% {:>5} {:<3} {:>5}%  {}\n",
                row.weekday,
                row.date,
                row.temp_max,
                row.temp_min,
                row.humidity,
                row.wind_speed,
                self.unit.wind_speed_label(),
                row.precip_percent,
                row.icon
            ));
        }

        table
    }

    pub fn hourly_table(&self, rows: &[HourlyDisplay]) -> String {
        let mut table = String::new();

        for row in rows {
            table.push_str(&format!(
                "{:>5}  {:>4}{}  feels {:>4}°  {:>3}%  {:>5.1} {:<3}  {:>3}%  {:>4}hPa  {}\n",
                row.time,
                row.temp,
                self.unit.temperature_label(),
                row.feels_like,
                row.humidity,
                row.wind_speed,
                self.unit.wind_speed_label(),
                row.precip_percent,
                row.pressure,
                row.description
            ));
        }

        table
    }
}

impl Default for ForecastView {
    fn default() -> Self {
        Self::new(Unit::default())
    }
}

pub fn icon_url(icon: &str) -> String {
    format!("{}/{}.png", ICON_BASE_URL, icon)
}

/// 12-hour clock label such as "12 AM" or "3 PM"
fn hour_label(sample: &ForecastSample, offset: FixedOffset) -> String {
    let hour = sample.datetime().with_timezone(&offset).hour();
    let display_hour = if hour % 12 == 0 { 12 } else { hour % 12 };
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    format!("{} {}", display_hour, meridiem)
}
