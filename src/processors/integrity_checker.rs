use crate::models::ForecastSample;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::warn;
use validator::Validate;

#[derive(Debug, Clone, Default)]
pub struct IntegrityReport {
    pub total_samples: usize,
    pub valid_samples: usize,
    pub violations: Vec<SampleViolation>,
    pub samples_per_day: BTreeMap<NaiveDate, usize>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn valid_percentage(&self) -> f64 {
        if self.total_samples == 0 {
            return 100.0;
        }
        100.0 * self.valid_samples as f64 / self.total_samples as f64
    }
}

#[derive(Debug, Clone)]
pub struct SampleViolation {
    pub index: usize,
    pub timestamp: i64,
    pub violation_type: ViolationType,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationType {
    OutOfOrder,
    DuplicateTimestamp,
    MinAboveMax,
    OutOfRange,
}

pub struct IntegrityChecker;

impl IntegrityChecker {
    pub fn new() -> Self {
        Self
    }

    /// Check a sample sequence. Problems are reported, never raised.
    pub fn check_integrity(&self, samples: &[ForecastSample]) -> IntegrityReport {
        let mut report = IntegrityReport {
            total_samples: samples.len(),
            ..Default::default()
        };

        for (index, sample) in samples.iter().enumerate() {
            let before = report.violations.len();
            self.check_sample(index, sample, &mut report);

            if report.violations.len() == before {
                report.valid_samples += 1;
            }

            *report.samples_per_day.entry(sample.date()).or_default() += 1;
        }

        self.check_time_series(samples, &mut report);

        if !report.is_clean() {
            warn!(
                violations = report.violations.len(),
                samples = report.total_samples,
                "Forecast samples failed integrity checks"
            );
        }

        report
    }

    fn check_sample(&self, index: usize, sample: &ForecastSample, report: &mut IntegrityReport) {
        if let Err(errors) = sample.validate() {
            report.violations.push(SampleViolation {
                index,
                timestamp: sample.timestamp,
                violation_type: ViolationType::OutOfRange,
                details: errors.to_string(),
            });
        }

        if !sample.has_finite_temperatures() {
            report.violations.push(SampleViolation {
                index,
                timestamp: sample.timestamp,
                violation_type: ViolationType::OutOfRange,
                details: "temperature is not a finite number".to_string(),
            });
        }

        if sample.temp_min > sample.temp_max {
            report.violations.push(SampleViolation {
                index,
                timestamp: sample.timestamp,
                violation_type: ViolationType::MinAboveMax,
                details: format!(
                    "temp_min {:.1}°C is above temp_max {:.1}°C",
                    sample.temp_min, sample.temp_max
                ),
            });
        }
    }

    /// Samples must arrive in strictly increasing time order
    fn check_time_series(&self, samples: &[ForecastSample], report: &mut IntegrityReport) {
        for (offset, window) in samples.windows(2).enumerate() {
            let prev = &window[0];
            let curr = &window[1];

            let violation_type = if curr.timestamp < prev.timestamp {
                ViolationType::OutOfOrder
            } else if curr.timestamp == prev.timestamp {
                ViolationType::DuplicateTimestamp
            } else {
                continue;
            };

            report.violations.push(SampleViolation {
                index: offset + 1,
                timestamp: curr.timestamp,
                violation_type,
                details: format!("timestamp {} follows {}", curr.datetime(), prev.datetime()),
            });
        }
    }

    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== Integrity Check Report ===\n");
        summary.push_str(&format!("Total Samples: {}\n", report.total_samples));
        summary.push_str(&format!(
            "Valid Samples: {} ({:.1}%)\n",
            report.valid_samples,
            report.valid_percentage()
        ));
        summary.push_str(&format!("Days Covered: {}\n", report.samples_per_day.len()));
        for (date, count) in &report.samples_per_day {
            summary.push_str(&format!("  {}: {} samples\n", date, count));
        }
        summary.push_str(&format!("\nViolations: {}\n", report.violations.len()));

        if !report.violations.is_empty() {
            summary.push_str("\nTop 10 Violations:\n");
            for (i, violation) in report.violations.iter().take(10).enumerate() {
                summary.push_str(&format!(
                    "  {}. Sample #{} ({:?}): {}\n",
                    i + 1,
                    violation.index,
                    violation.violation_type,
                    violation.details
                ));
            }
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}
