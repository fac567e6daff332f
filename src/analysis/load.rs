//! Load response analysis.
//!
//! Segments samples by load current and measures how well the output voltage
//! holds in each load band. Also counts load steps, i.e. adjacent samples
//! whose current differs by more than a fixed amount.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

use super::statistics::{compute_descriptive_stats, count_adjacent};
use super::Analyzer;
use crate::parsers::types::RecordSeries;

/// Load current classification
#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumIter, PartialEq, Eq, Serialize)]
pub enum LoadBand {
    #[strum(serialize = "Light Load")]
    Light,
    #[strum(serialize = "Medium Load")]
    Medium,
    #[strum(serialize = "Heavy Load")]
    Heavy,
}

/// Load band limits and load step size, in amps
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadThresholds {
    /// Currents strictly below this are light load
    pub light_below: f64,
    /// Currents at or above this are heavy load
    pub heavy_from: f64,
    /// Minimum current change between adjacent samples counted as a load step
    pub transition_step: f64,
}

impl Default for LoadThresholds {
    fn default() -> Self {
        Self {
            light_below: 1.0,
            heavy_from: 3.0,
            transition_step: 0.5,
        }
    }
}

impl LoadThresholds {
    pub fn classify(&self, current: f64) -> LoadBand {
        if current < self.light_below {
            LoadBand::Light
        } else if current < self.heavy_from {
            LoadBand::Medium
        } else {
            LoadBand::Heavy
        }
    }

    /// Human-readable current range of a band, e.g. `1.0-3.0A`
    pub fn describe(&self, band: LoadBand) -> String {
        match band {
            LoadBand::Light => format!("<{:.1}A", self.light_below),
            LoadBand::Medium => format!("{:.1}-{:.1}A", self.light_below, self.heavy_from),
            LoadBand::Heavy => format!(">={:.1}A", self.heavy_from),
        }
    }
}

/// Output voltage statistics within one load band
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct LoadBandStats {
    pub count: usize,
    pub mean_voltage: f64,
    /// Population standard deviation of the output voltage
    pub std_dev_voltage: f64,
    pub min_voltage: f64,
    pub max_voltage: f64,
}

impl LoadBandStats {
    fn from_voltages(voltages: &[f64]) -> Self {
        let stats = compute_descriptive_stats(voltages);
        Self {
            count: stats.count,
            mean_voltage: stats.mean,
            std_dev_voltage: stats.stdev,
            min_voltage: stats.min,
            max_voltage: stats.max,
        }
    }
}

/// Load response summary
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct LoadStats {
    /// Number of adjacent-sample load steps (an event count, not a rate)
    pub load_transitions: usize,
    pub light: LoadBandStats,
    pub medium: LoadBandStats,
    pub heavy: LoadBandStats,
}

impl LoadStats {
    pub fn band(&self, band: LoadBand) -> &LoadBandStats {
        match band {
            LoadBand::Light => &self.light,
            LoadBand::Medium => &self.medium,
            LoadBand::Heavy => &self.heavy,
        }
    }
}

/// Segments samples by load current
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadResponseAnalyzer {
    pub thresholds: LoadThresholds,
}

impl LoadResponseAnalyzer {
    pub fn new(thresholds: LoadThresholds) -> Self {
        Self { thresholds }
    }
}

impl Analyzer for LoadResponseAnalyzer {
    type Output = LoadStats;

    fn id(&self) -> &str {
        "load_response"
    }

    fn name(&self) -> &str {
        "Load Response"
    }

    fn analyze(&self, series: &RecordSeries) -> LoadStats {
        let currents = series.load_currents();
        let step = self.thresholds.transition_step;
        let load_transitions = count_adjacent(&currents, |a, b| (b - a).abs() > step);

        let mut light = Vec::new();
        let mut medium = Vec::new();
        let mut heavy = Vec::new();
        for record in series {
            match self.thresholds.classify(record.load_current) {
                LoadBand::Light => light.push(record.output_voltage),
                LoadBand::Medium => medium.push(record.output_voltage),
                LoadBand::Heavy => heavy.push(record.output_voltage),
            }
        }

        LoadStats {
            load_transitions,
            light: LoadBandStats::from_voltages(&light),
            medium: LoadBandStats::from_voltages(&medium),
            heavy: LoadBandStats::from_voltages(&heavy),
        }
    }
}
