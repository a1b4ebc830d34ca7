//! Text summary of a report for terminal output.

use super::json::DeoptReport;
use crate::aggregator::histogram::{total_severities, FileSeverities, SeveritySummary};
use crate::parser::schema::Severity;

const FILE_COLUMN_WIDTH: usize = 40;

/// Render the per-file severity table, worst files first
///
/// Files are ordered by their count of severity-3 entries, then severity-2,
/// then path. At most `max_lines` files are listed.
pub fn generate_text_summary(report: &DeoptReport, max_lines: usize) -> String {
    let mut rows: Vec<(&str, &FileSeverities)> = report
        .files
        .iter()
        .map(|(file, entry)| (display_name(file, &entry.relative_path), &entry.severities))
        .collect();

    rows.sort_by(|(a_name, a), (b_name, b)| {
        b.at(Severity::High)
            .cmp(&a.at(Severity::High))
            .then(b.at(Severity::Medium).cmp(&a.at(Severity::Medium)))
            .then(a_name.cmp(b_name))
    });

    let mut lines = Vec::new();
    lines.push("  DEOPT SUMMARY (severity 1 / 2 / 3)".to_string());
    lines.push(format!(
        "  {:<width$}  {:^14}  {:^14}  {:^14}",
        "File",
        "Codes",
        "Deopts",
        "ICs",
        width = FILE_COLUMN_WIDTH
    ));
    lines.push(format!("  {}", "-".repeat(FILE_COLUMN_WIDTH + 48)));

    for (name, severities) in rows.iter().take(max_lines) {
        lines.push(format_row(name, severities));
    }

    lines.push(format!("  {}", "-".repeat(FILE_COLUMN_WIDTH + 48)));
    let total = total_severities(report.files.values().map(|f| &f.severities));
    lines.push(format_row("Total", &total));

    if rows.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} files)",
            max_lines,
            rows.len()
        ));
    }

    if !report.diagnostics.is_empty() {
        lines.push(String::new());
        lines.push(format!("  {} diagnostics:", report.diagnostics.len()));
        for diagnostic in &report.diagnostics {
            lines.push(format!("   - {}", diagnostic));
        }
    }

    lines.join("\n")
}

fn display_name<'a>(file: &'a str, relative_path: &'a str) -> &'a str {
    if file.is_empty() {
        "<unknown>"
    } else {
        relative_path
    }
}

fn format_row(name: &str, severities: &FileSeverities) -> String {
    // Keep the tail of long paths, it is the part that identifies the file
    let display = if name.chars().count() > FILE_COLUMN_WIDTH {
        let tail: String = name
            .chars()
            .rev()
            .take(FILE_COLUMN_WIDTH - 3)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{}", tail)
    } else {
        name.to_string()
    };

    format!(
        "  {:<width$}  {:^14}  {:^14}  {:^14}",
        display,
        format_buckets(&severities.codes),
        format_buckets(&severities.deopts),
        format_buckets(&severities.ics),
        width = FILE_COLUMN_WIDTH
    )
}

fn format_buckets(summary: &SeveritySummary) -> String {
    format!("{}/{}/{}", summary[0], summary[1], summary[2])
}
