//! Analysis passes over decoded ERPC telemetry.
//!
//! Every pass is a pure function of a [`RecordSeries`]: it reads the series,
//! never mutates it, and returns an independent summary that holds no
//! reference back to the records. The passes can therefore run in any order
//! on the same filtered series.
//!
//! - [`filters`] - voltage validity filter applied before every other pass
//! - [`switching`] - gate transition statistics
//! - [`regions`] - voltage region classification and gate duty cycle
//! - [`load`] - load band segmentation and load step detection
//! - [`statistics`] - shared descriptive statistics helpers

pub mod filters;
pub mod load;
pub mod regions;
pub mod statistics;
pub mod switching;

use crate::parsers::types::RecordSeries;
use std::time::Instant;
use thiserror::Error;

/// Errors that stop the analysis pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Every parsed record fell outside the validity band, or nothing parsed
    #[error(
        "No valid samples after filtering: 0 of {total_count} records within \
         {min_voltage}V < Vout < {max_voltage}V"
    )]
    NoValidSamples {
        total_count: usize,
        min_voltage: f64,
        max_voltage: f64,
    },

    /// Invalid parameter configuration
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Core trait for analysis passes
pub trait Analyzer {
    /// Summary produced by the pass
    type Output;

    /// Unique identifier for this analyzer
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Run the pass over a series
    fn analyze(&self, series: &RecordSeries) -> Self::Output;
}

/// Run an analyzer and log how long it took
pub fn run_analyzer<A: Analyzer>(analyzer: &A, series: &RecordSeries) -> A::Output {
    let (output, elapsed_ms) = timed_analyze(|| analyzer.analyze(series));
    tracing::debug!(
        "{} ({}) processed {} samples in {} ms",
        analyzer.name(),
        analyzer.id(),
        series.len(),
        elapsed_ms
    );
    output
}

/// Helper function to measure analysis execution time
pub fn timed_analyze<F, T>(f: F) -> (T, u64)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed().as_millis() as u64;
    (result, elapsed)
}
