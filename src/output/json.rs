//! JSON report writer.
//!
//! Turns a `ParsedLog` into a `DeoptReport` and writes it to disk, either as
//! plain JSON or as the `window.V8Data = ...;` script the web viewer loads.

use super::paths::{determine_common_root, relative_path};
use super::validate_path;
use crate::aggregator::histogram::{file_severities, FileSeverities};
use crate::parser::schema::{Diagnostic, ParseStats, PerFileDeoptInfo};
use crate::parser::ParsedLog;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeoptReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Directory shared by all files, stripped from `relativePath`
    pub root: String,

    /// Entries per resolved file path
    pub files: BTreeMap<String, FileReport>,

    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,

    #[serde(default)]
    pub stats: ParseStats,
}

/// One file's entries plus display data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub relative_path: String,

    #[serde(flatten)]
    pub info: PerFileDeoptInfo,

    pub severities: FileSeverities,
}

impl DeoptReport {
    /// Build a report from a parse result
    ///
    /// **Public** - used by commands to create the final output
    pub fn from_parsed(parsed: ParsedLog) -> Self {
        let root = determine_common_root(parsed.files.keys().map(String::as_str));
        debug!("Common root for {} files: {:?}", parsed.files.len(), root);

        let files = parsed
            .files
            .into_iter()
            .map(|(file, info)| {
                let report = FileReport {
                    relative_path: relative_path(&file, &root).to_string(),
                    severities: file_severities(&info),
                    info,
                };
                (file, report)
            })
            .collect();

        Self {
            version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            root,
            files,
            diagnostics: parsed.diagnostics,
            stats: parsed.stats,
        }
    }

    /// Total number of entries across all files
    pub fn entry_count(&self) -> usize {
        self.files.values().map(|f| f.info.len()).sum()
    }
}

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &DeoptReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing report to: {}", output_path.display());

    let mut writer = create_writer(output_path)?;
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );
    Ok(())
}

/// Write the per-file entries as a script assigning `window.V8Data`
///
/// This is the data file the web viewer's `index.html` includes.
pub fn write_data_script(
    report: &DeoptReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing viewer data script to: {}", output_path.display());

    let mut writer = create_writer(output_path)?;
    writer.write_all(b"window.V8Data = ")?;
    serde_json::to_writer_pretty(&mut writer, &report.files)?;
    writer.write_all(b";\n")?;
    writer.flush()?;

    info!(
        "Data script written successfully ({} bytes)",
        calculate_file_size(output_path)
    );
    Ok(())
}

/// Read a report from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<DeoptReport, OutputError> {
    let input_path = input_path.as_ref();
    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path)?;
    let report: DeoptReport = serde_json::from_reader(std::io::BufReader::new(file))?;

    debug!(
        "Report loaded: version {}, {} files",
        report.version,
        report.files.len()
    );
    Ok(report)
}

/// Validate the path and open a buffered writer, creating parent dirs
fn create_writer(output_path: &Path) -> Result<BufWriter<File>, OutputError> {
    validate_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path)?;
    Ok(BufWriter::new(file))
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
