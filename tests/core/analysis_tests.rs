//! Tests for the analysis passes
//!
//! Tests cover:
//! - Switching statistics on constant, alternating and mixed gate patterns
//! - Region classification and gate duty cycle
//! - Load band statistics and load step counting
//! - Determinism of every pass

#[path = "../common/mod.rs"]
mod common;

use common::float_cmp::*;
use common::synthetic::*;
use erpclog::analysis::load::{LoadBand, LoadResponseAnalyzer};
use erpclog::analysis::regions::{RegionAnalyzer, VoltageRegion};
use erpclog::analysis::switching::{transition_indices, SwitchingAnalyzer};
use erpclog::analysis::Analyzer;
use erpclog::parsers::types::{Parseable, RecordSeries};
use erpclog::parsers::Erpc;
use strum::IntoEnumIterator;

fn parse(log: &str) -> RecordSeries {
    Erpc.parse(log)
}

// ============================================
// Switching Tests
// ============================================

#[test]
fn test_switching_constant_gate() {
    let stats = SwitchingAnalyzer.analyze(&parse(&gate_log(&[false; 25])));

    assert_eq!(stats.total_samples, 25);
    assert_eq!(stats.switch_count, 0);
    assert_eq!(stats.reduction_percent, 100.0);
    assert_eq!(stats.avg_samples_per_switch, 25.0);
}

#[test]
fn test_switching_alternating_gate() {
    let gates: Vec<bool> = (0..40).map(|i| i % 2 == 0).collect();
    let stats = SwitchingAnalyzer.analyze(&parse(&gate_log(&gates)));

    assert_eq!(stats.switch_count, stats.total_samples - 1);
    assert_approx_eq(stats.reduction_percent, 2.5, DEFAULT_TOLERANCE);
    assert_approx_eq(stats.avg_samples_per_switch, 1.0, DEFAULT_TOLERANCE);
}

#[test]
fn test_switching_bursts() {
    // ON x4, OFF x4, ON x2 -> 2 transitions over 10 samples
    let gates = [
        true, true, true, true, false, false, false, false, true, true,
    ];
    let series = parse(&gate_log(&gates));
    let stats = SwitchingAnalyzer.analyze(&series);

    assert_eq!(stats.switch_count, 2);
    assert_eq!(stats.rising_edges, 1);
    assert_eq!(stats.falling_edges, 1);
    assert_approx_eq(stats.reduction_percent, 80.0, DEFAULT_TOLERANCE);
    assert_approx_eq(stats.avg_samples_per_switch, 10.0 / 3.0, DEFAULT_TOLERANCE);
    assert_approx_eq(stats.switching_frequency, 0.2, DEFAULT_TOLERANCE);
    assert_eq!(stats.eliminated_switches, 8);
    assert_eq!(transition_indices(&series), vec![3, 7]);
}

#[test]
fn test_switching_empty_series() {
    let stats = SwitchingAnalyzer.analyze(&RecordSeries::default());

    assert_eq!(stats.total_samples, 0);
    assert_eq!(stats.reduction_percent, 0.0);
    assert_eq!(stats.switching_frequency, 0.0);
}

// ============================================
// Region Tests
// ============================================

#[test]
fn test_regions_classification() {
    let log = [
        telemetry_line(1, 5.00, 0.2, 0.10, true),
        telemetry_line(2, 4.50, 0.2, 0.30, true),
        telemetry_line(3, 6.50, 0.2, -0.20, false),
        telemetry_line(4, 7.20, 0.2, -0.50, false),
        telemetry_line(5, 1.50, 0.2, 0.80, true),
    ]
    .join("\n");

    let stats = RegionAnalyzer::default().analyze(&parse(&log));

    assert_eq!(stats.nominal.count, 2);
    assert_approx_eq(stats.nominal.average_entropy, 0.2, DEFAULT_TOLERANCE);
    assert_eq!(stats.overvoltage.count, 1);
    assert_approx_eq(stats.overvoltage.average_entropy, -0.5, DEFAULT_TOLERANCE);
    assert_eq!(stats.undervoltage.count, 1);
    assert_approx_eq(stats.undervoltage.average_entropy, 0.8, DEFAULT_TOLERANCE);
    assert_approx_eq(stats.gate_on_percent, 60.0, DEFAULT_TOLERANCE);
    assert_approx_eq(stats.gate_off_percent, 40.0, DEFAULT_TOLERANCE);
}

#[test]
fn test_regions_empty_band_entropy_is_zero() {
    let stats = RegionAnalyzer::default().analyze(&parse(&voltage_log(&[5.0, 5.5])));

    assert_eq!(stats.overvoltage.count, 0);
    assert_eq!(stats.overvoltage.average_entropy, 0.0);
    assert!(!stats.undervoltage.average_entropy.is_nan());
    assert_eq!(stats.undervoltage.average_entropy, 0.0);
}

#[test]
fn test_regions_duty_cycle_complement() {
    let gates = [true, false, false, true, true, true, false];
    let stats = RegionAnalyzer::default().analyze(&parse(&gate_log(&gates)));

    assert_approx_eq(
        stats.gate_on_percent + stats.gate_off_percent,
        100.0,
        DEFAULT_TOLERANCE,
    );
}

#[test]
fn test_regions_band_accessor() {
    let stats = RegionAnalyzer::default().analyze(&parse(&voltage_log(&[5.0, 8.0, 2.0])));

    for region in VoltageRegion::iter() {
        assert_eq!(stats.band(region).count, 1, "{} should hold one sample", region);
    }
}

// ============================================
// Load Response Tests
// ============================================

#[test]
fn test_load_bands() {
    let log = [
        telemetry_line(1, 5.00, 0.20, 0.0, true),
        telemetry_line(2, 5.00, 0.40, 0.0, true),
        telemetry_line(3, 4.80, 1.00, 0.0, true),
        telemetry_line(4, 4.60, 2.50, 0.0, true),
        telemetry_line(5, 4.40, 3.00, 0.0, true),
    ]
    .join("\n");

    let stats = LoadResponseAnalyzer::default().analyze(&parse(&log));

    assert_eq!(stats.light.count, 2);
    assert_eq!(stats.light.mean_voltage, 5.0);
    assert_eq!(stats.light.std_dev_voltage, 0.0);
    assert_eq!(stats.medium.count, 2);
    assert_approx_eq(stats.medium.mean_voltage, 4.7, DEFAULT_TOLERANCE);
    assert_approx_eq(stats.medium.std_dev_voltage, 0.1, DEFAULT_TOLERANCE);
    assert_eq!(stats.heavy.count, 1);
    assert_eq!(stats.heavy.std_dev_voltage, 0.0);

    // 0.4 -> 1.0 and 1.0 -> 2.5 exceed the step, 2.5 -> 3.0 does not
    assert_eq!(stats.load_transitions, 2);
}

#[test]
fn test_load_single_member_band_has_zero_stdev() {
    let log = [
        telemetry_line(1, 5.37, 4.20, 0.0, true),
        telemetry_line(2, 5.00, 0.10, 0.0, true),
    ]
    .join("\n");
    let stats = LoadResponseAnalyzer::default().analyze(&parse(&log));

    assert_eq!(stats.heavy.count, 1);
    assert_eq!(stats.heavy.std_dev_voltage, 0.0);
    assert_approx_eq(stats.heavy.mean_voltage, 5.37, DEFAULT_TOLERANCE);
}

#[test]
fn test_load_empty_bands() {
    let stats = LoadResponseAnalyzer::default().analyze(&RecordSeries::default());

    for band in LoadBand::iter() {
        let band_stats = stats.band(band);
        assert_eq!(band_stats.count, 0);
        assert_eq!(band_stats.mean_voltage, 0.0);
        assert_eq!(band_stats.std_dev_voltage, 0.0);
    }
    assert_eq!(stats.load_transitions, 0);
}

// ============================================
// Determinism Tests
// ============================================

#[test]
fn test_analyzers_are_deterministic() {
    let log = (1..200)
        .map(|i| {
            let phase = i as f64 / 7.0;
            telemetry_line(
                i,
                5.0 + phase.sin(),
                2.0 + 2.0 * phase.cos(),
                phase.sin() / 2.0,
                i % 5 < 2,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let series = parse(&log);

    assert_eq!(
        SwitchingAnalyzer.analyze(&series),
        SwitchingAnalyzer.analyze(&series)
    );
    assert_eq!(
        RegionAnalyzer::default().analyze(&series),
        RegionAnalyzer::default().analyze(&series)
    );
    assert_eq!(
        LoadResponseAnalyzer::default().analyze(&series),
        LoadResponseAnalyzer::default().analyze(&series)
    );
}
