//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads the V8 log
//! 2. Parses it into per-file entries
//! 3. Builds the report
//! 4. Writes the output file

use crate::commands::models::{AnalyzeArgs, OutputFormat};
use crate::output::{generate_text_summary, write_data_script, write_report, DeoptReport};
use crate::parser::parse_v8_log_bytes;
use crate::utils::config::{load_options, ParseOptions};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The report that was written
///
/// # Errors
/// * Config file read/parse failures
/// * Log file read failures
/// * File write errors
///
/// # Example
/// ```ignore
/// let args = AnalyzeArgs {
///     input: PathBuf::from("v8.log"),
///     print_summary: true,
///     ..Default::default()
/// };
///
/// execute_analyze(args)?;
/// ```
pub fn execute_analyze(args: AnalyzeArgs) -> Result<DeoptReport> {
    let start_time = Instant::now();
    info!("Analyzing log: {}", args.input.display());

    let options = resolve_options(&args)?;
    debug!("Parse options: {:?}", options);

    info!("Step 1/3: Reading log...");
    let raw = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read log file {}", args.input.display()))?;

    info!("Step 2/3: Parsing log ({} bytes)...", raw.len());
    let parsed = parse_v8_log_bytes(&raw, &options);
    if parsed.stats.malformed_lines > 0 {
        warn!("Skipped {} malformed lines", parsed.stats.malformed_lines);
    }
    if parsed.files.is_empty() {
        warn!("No entries found; was the log produced with --trace-ic?");
    }

    let report = DeoptReport::from_parsed(parsed);
    info!(
        "Found {} entries in {} files",
        report.entry_count(),
        report.files.len()
    );

    info!("Step 3/3: Writing output...");
    let written = match args.format {
        OutputFormat::Json => write_report(&report, &args.output),
        OutputFormat::Js => write_data_script(&report, &args.output),
    };
    written.context("Failed to write report")?;
    info!("✓ Report written to: {}", args.output.display());

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("{}", generate_text_summary(&report, args.summary_lines));
        println!("{}", "=".repeat(80));
    }

    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(report)
}

/// Merge the optional config file with command-line overrides
///
/// `--keep-internals` can only switch internals on; a config file that
/// already keeps them is not overridden by the flag's absence.
pub fn resolve_options(args: &AnalyzeArgs) -> Result<ParseOptions> {
    let mut options = match &args.config {
        Some(path) => load_options(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ParseOptions::default(),
    };

    if args.keep_internals {
        options.keep_internals = true;
    }
    if let Some(workers) = args.workers {
        options = options.with_workers(workers);
    }
    Ok(options)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input log path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input log not found: {}", args.input.display());
    }

    if args.workers == Some(0) {
        anyhow::bail!("workers must be greater than 0");
    }

    if args.summary_lines == 0 {
        anyhow::bail!("summary_lines must be greater than 0");
    }

    Ok(())
}
