//! Gate switching statistics.
//!
//! Compares the number of gate transitions against a conventional PWM
//! controller, which is assumed to switch once per sample period.

use serde::Serialize;

use super::statistics::{count_adjacent, ratio};
use super::Analyzer;
use crate::parsers::types::RecordSeries;

/// Gate transition summary
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SwitchingStats {
    pub total_samples: usize,
    /// Adjacent sample pairs where the gate changed state
    pub switch_count: usize,
    /// OFF -> ON transitions
    pub rising_edges: usize,
    /// ON -> OFF transitions
    pub falling_edges: usize,
    /// Baseline: one switch per sample
    pub traditional_switches: usize,
    /// Baseline minus actual transitions
    pub eliminated_switches: usize,
    pub reduction_percent: f64,
    pub avg_samples_per_switch: f64,
    /// Transitions per sample
    pub switching_frequency: f64,
}

/// Counts gate transitions and derives the switching reduction
#[derive(Clone, Copy, Debug, Default)]
pub struct SwitchingAnalyzer;

impl Analyzer for SwitchingAnalyzer {
    type Output = SwitchingStats;

    fn id(&self) -> &str {
        "switching_efficiency"
    }

    fn name(&self) -> &str {
        "Switching Efficiency"
    }

    fn analyze(&self, series: &RecordSeries) -> SwitchingStats {
        compute_switching_stats(&series.gate_states())
    }
}

/// Compute switching statistics from a gate column in time order
pub fn compute_switching_stats(gates: &[bool]) -> SwitchingStats {
    let total_samples = gates.len();
    let rising_edges = count_adjacent(gates, |a, b| !*a && *b);
    let falling_edges = count_adjacent(gates, |a, b| *a && !*b);
    let switch_count = rising_edges + falling_edges;

    let traditional_switches = total_samples;
    let eliminated_switches = traditional_switches.saturating_sub(switch_count);

    let reduction_percent = if traditional_switches > 0 {
        (traditional_switches as f64 - switch_count as f64) / traditional_switches as f64 * 100.0
    } else {
        0.0
    };

    let avg_samples_per_switch = if switch_count > 0 {
        total_samples as f64 / (switch_count + 1) as f64
    } else {
        total_samples as f64
    };

    SwitchingStats {
        total_samples,
        switch_count,
        rising_edges,
        falling_edges,
        traditional_switches,
        eliminated_switches,
        reduction_percent,
        avg_samples_per_switch,
        switching_frequency: ratio(switch_count, total_samples),
    }
}

/// Positions `i` where the gate differs between record `i` and `i + 1`.
///
/// Used to mark switching events when plotting the gate column.
pub fn transition_indices(series: &RecordSeries) -> Vec<usize> {
    series
        .records()
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].gate_on != pair[1].gate_on)
        .map(|(i, _)| i)
        .collect()
}
