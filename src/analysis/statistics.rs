//! Statistical helpers shared by the analysis passes.
//!
//! All helpers return 0 instead of NaN or a panic when the input is empty or
//! a denominator is zero.

use serde::Serialize;

/// Container for descriptive statistics
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divides by N)
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
}

/// Compute descriptive statistics for a dataset
pub fn compute_descriptive_stats(data: &[f64]) -> DescriptiveStats {
    if data.is_empty() {
        return DescriptiveStats::default();
    }

    let mean = mean(data);

    // Variance (two-pass for stability)
    let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / data.len() as f64;

    let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    DescriptiveStats {
        count: data.len(),
        mean,
        stdev: variance.sqrt(),
        min,
        max,
    }
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// `part / whole`, 0 when `whole` is 0
pub fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}

/// `part / whole * 100`, 0 when `whole` is 0
pub fn percentage(part: usize, whole: usize) -> f64 {
    ratio(part, whole) * 100.0
}

/// Count adjacent pairs `(values[i], values[i + 1])` matching `predicate`
pub fn count_adjacent<T, F>(values: &[T], predicate: F) -> usize
where
    F: Fn(&T, &T) -> bool,
{
    values
        .windows(2)
        .filter(|pair| predicate(&pair[0], &pair[1]))
        .count()
}
