// Mismatch reports
//
// The text layout is consumed by existing scripts, so its wording and the
// bracketed base list are kept stable.

use crate::analysis::{AnalysisResult, Mismatch};
use crate::config::ReportConfig;
use crate::error::Result;
use serde::Serialize;

pub const NO_MISMATCHES: &str = "No mismatches found.";
pub const MISMATCHES_HEADER: &str = "Mismatches found in class inheritance:";

/// Plain-text report, one line per mismatch
pub fn render_text(mismatches: &[Mismatch], labels: &ReportConfig) -> String {
    if mismatches.is_empty() {
        return NO_MISMATCHES.to_string();
    }

    let mut lines = Vec::with_capacity(mismatches.len() + 1);
    lines.push(MISMATCHES_HEADER.to_string());
    for mismatch in mismatches {
        lines.push(format!(
            "Class: {}, {} Base: {}, {} Base: {}",
            mismatch.class_name,
            labels.source_label,
            format_list(&mismatch.expected_bases),
            labels.header_label,
            mismatch.actual_base
        ));
    }
    lines.join("\n")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    mismatches: &'a [Mismatch],
    source_classes: usize,
    header_classes: usize,
}

/// Pretty-printed JSON report
pub fn render_json(result: &AnalysisResult) -> Result<String> {
    let report = JsonReport {
        mismatches: &result.mismatches,
        source_classes: result.classes.len(),
        header_classes: result.header.len(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// `['A', 'B']`
fn format_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| format!("'{}'", s)).collect();
    format!("[{}]", quoted.join(", "))
}
