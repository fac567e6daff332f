//! erpclog - Telemetry log analyzer for entropy-regulated power controllers
//!
//! Reads a controller log, runs the analysis pipeline and prints the report.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use erpclog::{analyze_log, AnalysisSettings};

/// Analyze an ERPC controller telemetry log
#[derive(Debug, Parser)]
#[command(name = "erpclog", version)]
#[command(about = "Telemetry log analyzer for entropy-regulated power controllers")]
struct Args {
    /// Controller log to analyze
    #[arg(default_value = "erpc_log.txt")]
    log_file: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Read thresholds from a JSON settings file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the default settings as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    // Initialize logging on stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.print_config {
        println!("{}", AnalysisSettings::default().to_json_pretty()?);
        return Ok(());
    }

    let settings = match &args.config {
        Some(path) => AnalysisSettings::load_from(path)?,
        None => AnalysisSettings::load(),
    };

    if !args.log_file.exists() {
        bail!("Log file '{}' not found", args.log_file.display());
    }

    let log_text = std::fs::read_to_string(&args.log_file)
        .with_context(|| format!("Failed to read log file '{}'", args.log_file.display()))?;

    let report = analyze_log(&log_text, &settings)?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    Ok(())
}
