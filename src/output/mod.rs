//! Output writers for parse reports.
//!
//! This module handles:
//! - Building reports with display-relative paths
//! - Writing JSON reports and viewer data scripts
//! - Text summaries

pub mod json;
pub mod paths;
pub mod summary;

// Re-export main functions
pub use json::{read_report, write_data_script, write_report, DeoptReport, FileReport};
pub use paths::{determine_common_root, relative_path};
pub use summary::generate_text_summary;

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
