//! Voltage validity filter.
//!
//! Samples below the lower bound are no-power or collapse states; samples
//! above the upper bound come from manual calibration (potentiometer
//! adjustment). Neither reflects steady-state regulation, so both are dropped
//! before any statistics are computed.

use serde::{Deserialize, Serialize};

use super::statistics::percentage;
use super::AnalysisError;
use crate::parsers::types::{Record, RecordSeries};

/// Default lower voltage bound (exclusive)
pub const DEFAULT_MIN_VOLTAGE: f64 = 0.5;

/// Default upper voltage bound (exclusive)
pub const DEFAULT_MAX_VOLTAGE: f64 = 12.0;

/// Keeps records whose output voltage lies strictly inside
/// `(min_voltage, max_voltage)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidityFilter {
    pub min_voltage: f64,
    pub max_voltage: f64,
}

impl Default for ValidityFilter {
    fn default() -> Self {
        Self {
            min_voltage: DEFAULT_MIN_VOLTAGE,
            max_voltage: DEFAULT_MAX_VOLTAGE,
        }
    }
}

/// Kept/total counts of one filter run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub kept_count: usize,
    pub total_count: usize,
    pub excluded_count: usize,
}

impl FilterSummary {
    pub fn new(kept_count: usize, total_count: usize) -> Self {
        Self {
            kept_count,
            total_count,
            excluded_count: total_count.saturating_sub(kept_count),
        }
    }

    /// Share of records dropped by the filter, 0 for an empty input
    pub fn excluded_percent(&self) -> f64 {
        percentage(self.excluded_count, self.total_count)
    }
}

/// Output of a filter run: the kept records and the counts
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilteredSeries {
    pub series: RecordSeries,
    pub summary: FilterSummary,
}

impl ValidityFilter {
    pub fn new(min_voltage: f64, max_voltage: f64) -> Self {
        Self {
            min_voltage,
            max_voltage,
        }
    }

    /// Whether a single record lies inside the band
    pub fn accepts(&self, record: &Record) -> bool {
        self.min_voltage < record.output_voltage && record.output_voltage < self.max_voltage
    }

    /// Project `series` onto the valid records. The input is left untouched.
    pub fn apply(&self, series: &RecordSeries) -> FilteredSeries {
        let kept = series.select(|r| self.accepts(r));
        let summary = FilterSummary::new(kept.len(), series.len());

        tracing::info!(
            "Validity filter ({}V < Vout < {}V): kept {} of {} samples, excluded {} ({:.1}%)",
            self.min_voltage,
            self.max_voltage,
            summary.kept_count,
            summary.total_count,
            summary.excluded_count,
            summary.excluded_percent()
        );

        FilteredSeries {
            series: kept,
            summary,
        }
    }

    /// Like [`apply`](Self::apply), but an empty result is an error: no
    /// statistics are meaningful without at least one valid sample.
    pub fn apply_checked(&self, series: &RecordSeries) -> Result<FilteredSeries, AnalysisError> {
        let filtered = self.apply(series);
        if filtered.summary.kept_count == 0 {
            return Err(AnalysisError::NoValidSamples {
                total_count: filtered.summary.total_count,
                min_voltage: self.min_voltage,
                max_voltage: self.max_voltage,
            });
        }
        Ok(filtered)
    }
}
