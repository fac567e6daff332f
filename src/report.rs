//! Analysis report.
//!
//! Bundles the filter counts and the three analysis summaries, and renders
//! them as a plain-text report or JSON.

use serde::Serialize;
use std::fmt;
use strum::IntoEnumIterator;

use crate::analysis::filters::{FilterSummary, ValidityFilter};
use crate::analysis::load::{LoadBand, LoadStats, LoadThresholds};
use crate::analysis::regions::{RegionStats, RegionThresholds, VoltageRegion};
use crate::analysis::switching::SwitchingStats;

const RULE_WIDTH: usize = 80;

/// Complete result of one pipeline run
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub filter: FilterSummary,
    pub switching: SwitchingStats,
    pub regions: RegionStats,
    pub load: LoadStats,
    /// Thresholds the report was produced with, used for labels
    #[serde(skip)]
    pub bounds: ReportBounds,
}

/// Band limits shown next to each section heading
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReportBounds {
    pub filter: ValidityFilter,
    pub regions: RegionThresholds,
    pub load: LoadThresholds,
}

impl AnalysisReport {
    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(f)?;
    writeln!(f, "{}", rule)?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", rule)
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filter = &self.filter;
        heading(f, "VALID OPERATION FILTER")?;
        writeln!(
            f,
            "Accepted band:                 {}V < Vout < {}V",
            self.bounds.filter.min_voltage, self.bounds.filter.max_voltage
        )?;
        writeln!(f, "Parsed samples:                {}", filter.total_count)?;
        writeln!(f, "Valid samples:                 {}", filter.kept_count)?;
        writeln!(
            f,
            "Excluded samples:              {} ({:.1}%)",
            filter.excluded_count,
            filter.excluded_percent()
        )?;

        let switching = &self.switching;
        heading(f, "SWITCHING EFFICIENCY RESULTS")?;
        writeln!(f, "Total valid samples:           {}", switching.total_samples)?;
        writeln!(f, "Gate transitions (actual):     {}", switching.switch_count)?;
        writeln!(
            f,
            "  OFF->ON / ON->OFF:           {} / {}",
            switching.rising_edges, switching.falling_edges
        )?;
        writeln!(
            f,
            "Traditional PWM switches:      {}",
            switching.traditional_switches
        )?;
        writeln!(
            f,
            "Switching reduction:           {:.2}%",
            switching.reduction_percent
        )?;
        writeln!(
            f,
            "Avg samples between switches:  {:.1}",
            switching.avg_samples_per_switch
        )?;
        writeln!(
            f,
            "Switching frequency:           {:.4} transitions/sample",
            switching.switching_frequency
        )?;

        heading(f, "OPERATING REGION ANALYSIS")?;
        for region in VoltageRegion::iter() {
            let band = self.regions.band(region);
            writeln!(f)?;
            writeln!(f, "{} ({}):", region, self.bounds.regions.describe(region))?;
            writeln!(f, "  Samples:      {}", band.count)?;
            writeln!(f, "  Avg Entropy:  {:.4}", band.average_entropy)?;
        }
        writeln!(f)?;
        writeln!(f, "Gate Duty Cycle:")?;
        writeln!(f, "  ON time:      {:.2}%", self.regions.gate_on_percent)?;
        writeln!(f, "  OFF time:     {:.2}%", self.regions.gate_off_percent)?;

        heading(f, "LOAD RESPONSE ANALYSIS")?;
        writeln!(
            f,
            "Load transitions detected: {} (step > {}A)",
            self.load.load_transitions, self.bounds.load.transition_step
        )?;
        for band in LoadBand::iter() {
            let stats = self.load.band(band);
            writeln!(f)?;
            writeln!(f, "{} ({}):", band, self.bounds.load.describe(band))?;
            writeln!(f, "  Samples:      {}", stats.count)?;
            writeln!(f, "  Avg Vout:     {:.3}V", stats.mean_voltage)?;
            writeln!(f, "  Std Dev:      {:.3}V", stats.std_dev_voltage)?;
            writeln!(
                f,
                "  Vout range:   {:.3}-{:.3}V",
                stats.min_voltage, stats.max_voltage
            )?;
        }

        heading(f, "ANALYSIS COMPLETE")?;
        writeln!(
            f,
            "Switching reduction of {:.2}%: {} gate transitions fewer than a \
             controller switching every sample.",
            switching.reduction_percent, switching.eliminated_switches
        )
    }
}
