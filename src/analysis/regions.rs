//! Operating region analysis.
//!
//! Classifies samples by output voltage into regulation regions and reports
//! the mean controller entropy in each, together with the gate duty cycle.
//! Regions are evaluated independently; a sample may fall in none of them.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

use super::statistics::{mean, percentage};
use super::Analyzer;
use crate::parsers::types::RecordSeries;

/// Voltage regions reported by [`RegionAnalyzer`]
#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumIter, PartialEq, Eq, Serialize)]
pub enum VoltageRegion {
    #[strum(serialize = "Nominal Regulation")]
    Nominal,
    #[strum(serialize = "Overvoltage")]
    Overvoltage,
    #[strum(serialize = "Undervoltage")]
    Undervoltage,
}

/// Region boundaries in volts
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionThresholds {
    /// Nominal lower bound (inclusive)
    pub nominal_min: f64,
    /// Nominal upper bound (inclusive)
    pub nominal_max: f64,
    /// Overvoltage starts strictly above this
    pub overvoltage_above: f64,
    /// Undervoltage lower bound (exclusive)
    pub undervoltage_min: f64,
    /// Undervoltage upper bound (exclusive)
    pub undervoltage_max: f64,
}

impl Default for RegionThresholds {
    fn default() -> Self {
        Self {
            nominal_min: 4.5,
            nominal_max: 6.0,
            overvoltage_above: 7.0,
            undervoltage_min: 0.5,
            undervoltage_max: 3.0,
        }
    }
}

impl RegionThresholds {
    /// Whether `voltage` belongs to `region`
    pub fn contains(&self, region: VoltageRegion, voltage: f64) -> bool {
        match region {
            VoltageRegion::Nominal => self.nominal_min <= voltage && voltage <= self.nominal_max,
            VoltageRegion::Overvoltage => voltage > self.overvoltage_above,
            VoltageRegion::Undervoltage => {
                self.undervoltage_min < voltage && voltage < self.undervoltage_max
            }
        }
    }

    /// Human-readable voltage range of a region, e.g. `4.5-6.0V`
    pub fn describe(&self, region: VoltageRegion) -> String {
        match region {
            VoltageRegion::Nominal => format!("{:.1}-{:.1}V", self.nominal_min, self.nominal_max),
            VoltageRegion::Overvoltage => format!(">{:.1}V", self.overvoltage_above),
            VoltageRegion::Undervoltage => {
                format!("{:.1}-{:.1}V", self.undervoltage_min, self.undervoltage_max)
            }
        }
    }
}

/// Sample count and mean entropy of one region
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct RegionBand {
    pub count: usize,
    /// 0 when the region is empty
    pub average_entropy: f64,
}

impl RegionBand {
    fn from_entropies(entropies: &[f64]) -> Self {
        Self {
            count: entropies.len(),
            average_entropy: mean(entropies),
        }
    }
}

/// Operating region summary
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct RegionStats {
    pub nominal: RegionBand,
    pub overvoltage: RegionBand,
    pub undervoltage: RegionBand,
    pub gate_on_percent: f64,
    pub gate_off_percent: f64,
}

impl RegionStats {
    pub fn band(&self, region: VoltageRegion) -> &RegionBand {
        match region {
            VoltageRegion::Nominal => &self.nominal,
            VoltageRegion::Overvoltage => &self.overvoltage,
            VoltageRegion::Undervoltage => &self.undervoltage,
        }
    }
}

/// Classifies samples into voltage regions
#[derive(Clone, Copy, Debug, Default)]
pub struct RegionAnalyzer {
    pub thresholds: RegionThresholds,
}

impl RegionAnalyzer {
    pub fn new(thresholds: RegionThresholds) -> Self {
        Self { thresholds }
    }
}

impl Analyzer for RegionAnalyzer {
    type Output = RegionStats;

    fn id(&self) -> &str {
        "operating_regions"
    }

    fn name(&self) -> &str {
        "Operating Regions"
    }

    fn analyze(&self, series: &RecordSeries) -> RegionStats {
        let mut nominal = Vec::new();
        let mut overvoltage = Vec::new();
        let mut undervoltage = Vec::new();
        let mut gate_on = 0;

        for record in series {
            let v = record.output_voltage;
            if self.thresholds.contains(VoltageRegion::Nominal, v) {
                nominal.push(record.entropy);
            }
            if self.thresholds.contains(VoltageRegion::Overvoltage, v) {
                overvoltage.push(record.entropy);
            }
            if self.thresholds.contains(VoltageRegion::Undervoltage, v) {
                undervoltage.push(record.entropy);
            }
            if record.gate_on {
                gate_on += 1;
            }
        }

        let total = series.len();
        RegionStats {
            nominal: RegionBand::from_entropies(&nominal),
            overvoltage: RegionBand::from_entropies(&overvoltage),
            undervoltage: RegionBand::from_entropies(&undervoltage),
            gate_on_percent: percentage(gate_on, total),
            gate_off_percent: percentage(total - gate_on, total),
        }
    }
}
