//! Per-file severity histograms for the summary view.
//!
//! Kept apart from grouping so a caller that re-filters the grouped map can
//! recompute the histograms without parsing again.

use crate::parser::schema::{DeoptInfo, PerFileDeoptInfo, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entry counts indexed by `severity - 1`
pub type SeveritySummary = [u32; 3];

/// Severity histograms for the three entry categories of one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSeverities {
    pub codes: SeveritySummary,
    pub deopts: SeveritySummary,
    pub ics: SeveritySummary,
}

impl FileSeverities {
    /// Count entries of every category at `severity`
    pub fn at(&self, severity: Severity) -> u32 {
        let bucket = severity.bucket();
        self.codes[bucket] + self.deopts[bucket] + self.ics[bucket]
    }

    /// Total entries across all categories and severities
    pub fn total(&self) -> u32 {
        Severity::ALL.iter().map(|s| self.at(*s)).sum()
    }

    fn add(&mut self, other: &FileSeverities) {
        for bucket in 0..3 {
            self.codes[bucket] += other.codes[bucket];
            self.deopts[bucket] += other.deopts[bucket];
            self.ics[bucket] += other.ics[bucket];
        }
    }
}

fn histogram(severities: impl Iterator<Item = Severity>) -> SeveritySummary {
    let mut summary = [0; 3];
    for severity in severities {
        summary[severity.bucket()] += 1;
    }
    summary
}

/// Histogram one file's entries
pub fn file_severities(info: &PerFileDeoptInfo) -> FileSeverities {
    FileSeverities {
        codes: histogram(info.codes.iter().map(|e| e.severity)),
        deopts: histogram(info.deopts.iter().map(|e| e.severity)),
        ics: histogram(info.ics.iter().map(|e| e.severity)),
    }
}

/// Histogram every file of a grouped result
///
/// **Public** - feeds the summary table and the report
pub fn severity_histograms(files: &DeoptInfo) -> BTreeMap<String, FileSeverities> {
    files
        .iter()
        .map(|(file, info)| (file.clone(), file_severities(info)))
        .collect()
}

/// Sum of all per-file histograms
pub fn total_severities<'a>(
    histograms: impl IntoIterator<Item = &'a FileSeverities>,
) -> FileSeverities {
    let mut total = FileSeverities::default();
    for file in histograms {
        total.add(file);
    }
    total
}
