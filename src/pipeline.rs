//! Parse -> filter -> analyze pipeline.
//!
//! The three analysis passes all read the same filtered series; none of them
//! sees the output of another.

use crate::analysis::filters::FilteredSeries;
use crate::analysis::load::LoadResponseAnalyzer;
use crate::analysis::regions::RegionAnalyzer;
use crate::analysis::switching::SwitchingAnalyzer;
use crate::analysis::{run_analyzer, AnalysisError};
use crate::parsers::types::{Parseable, RecordSeries};
use crate::parsers::Erpc;
use crate::report::{AnalysisReport, ReportBounds};
use crate::settings::AnalysisSettings;

/// Decode `log_text` and analyze it.
///
/// Fails with [`AnalysisError::InvalidParameter`] for unusable settings
/// (checked before decoding) and with [`AnalysisError::NoValidSamples`] when
/// nothing survives the validity filter, including the case where no line
/// decoded at all.
pub fn analyze_log(
    log_text: &str,
    settings: &AnalysisSettings,
) -> Result<AnalysisReport, AnalysisError> {
    check_settings(settings)?;

    let parsed = Erpc.parse(log_text);
    run_passes(&parsed, settings)
}

/// Filter an already decoded series and run every analysis pass on it
pub fn analyze_series(
    series: &RecordSeries,
    settings: &AnalysisSettings,
) -> Result<AnalysisReport, AnalysisError> {
    check_settings(settings)?;
    run_passes(series, settings)
}

fn check_settings(settings: &AnalysisSettings) -> Result<(), AnalysisError> {
    settings
        .validate()
        .map_err(|e| AnalysisError::InvalidParameter(e.to_string()))
}

fn run_passes(
    series: &RecordSeries,
    settings: &AnalysisSettings,
) -> Result<AnalysisReport, AnalysisError> {
    let FilteredSeries {
        series: valid,
        summary,
    } = settings.filter.apply_checked(series)?;

    let switching = run_analyzer(&SwitchingAnalyzer, &valid);
    let regions = run_analyzer(&RegionAnalyzer::new(settings.regions), &valid);
    let load = run_analyzer(&LoadResponseAnalyzer::new(settings.load), &valid);

    Ok(AnalysisReport {
        filter: summary,
        switching,
        regions,
        load,
        bounds: ReportBounds {
            filter: settings.filter,
            regions: settings.regions,
            load: settings.load,
        },
    })
}
