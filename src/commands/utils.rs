use crate::aggregator::total_severities;
use crate::output::read_report;
use crate::parser::Severity;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)
        .with_context(|| format!("Failed to read report {}", file_path.display()))?;
    let total = total_severities(report.files.values().map(|f| &f.severities));

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!("  Files: {}", report.files.len());
    println!("  Entries: {}", report.entry_count());
    println!(
        "  Severity 3 entries: {}",
        total.at(Severity::High)
    );
    println!("  Diagnostics: {}", report.diagnostics.len());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Deopt Trace Studio Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string        - Schema version (e.g., '1.0.0')");
        println!("  generatedAt: string    - ISO 8601 timestamp");
        println!("  root: string           - Directory shared by all files");
        println!("  files: object          - Entries keyed by file path (\"\" = unresolved)");
        println!("    relativePath: string - Path relative to root");
        println!("    codes: array         - Per-function code history");
        println!("      functionName, kind, updates[{{timestamp, state}}], severity");
        println!("    deopts: array        - Deoptimizations");
        println!("      functionName, bailoutType, deoptReason, inliningChain, severity");
        println!("    ics: array           - Inline cache transitions");
        println!("      icType, oldState, newState, key?, map?, severity");
        println!("    severities: object   - [sev1, sev2, sev3] counts per category");
        println!("  diagnostics: array     - Non-fatal parse findings");
        println!("  stats: object          - Line counters");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Deopt Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Per-file inline cache, deopt and code tiering reports from V8 trace logs.");
}
