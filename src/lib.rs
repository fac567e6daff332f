//! erpclog - Telemetry log analyzer for entropy-regulated power controllers
//!
//! This library decodes the text telemetry an ERPC controller prints, drops
//! samples outside the valid operating band, and reduces the rest to
//! switching, regulation-region and load-response statistics.
//!
//! ## Module Structure
//!
//! - [`parsers`] - Telemetry line decoder and the record/series data model
//! - [`analysis`] - Validity filter and the analysis passes
//! - [`pipeline`] - Parse -> filter -> analyze in one call
//! - [`report`] - Text and JSON rendering of analysis results
//! - [`settings`] - Threshold configuration

pub mod analysis;
pub mod parsers;
pub mod pipeline;
pub mod report;
pub mod settings;

pub use analysis::AnalysisError;
pub use pipeline::{analyze_log, analyze_series};
pub use report::AnalysisReport;
pub use settings::AnalysisSettings;
