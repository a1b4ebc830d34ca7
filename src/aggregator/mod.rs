//! Aggregation of classified entries into per-file views.
//!
//! This module transforms the engine's entry stream into:
//! - The per-file entry map (grouping)
//! - Per-file severity histograms (summary statistics)

pub mod grouper;
pub mod histogram;

// Re-export main types and functions
pub use grouper::group_by_file;
pub use histogram::{
    file_severities, severity_histograms, total_severities, FileSeverities, SeveritySummary,
};
