//! Structured JSON output for scripting and piping.
//!
//! When the `--json` flag is passed, the rendered report is serialized to
//! stdout as a single JSON object instead of the text bar graph.

use humansize::{BINARY, format_size};
use serde::Serialize;

use crate::{
    config::{ReferencePolicy, ReportOptions},
    render::ReportLine,
};

/// Top-level JSON output emitted when `--json` is active.
#[derive(Serialize, Debug)]
pub struct JsonOutput {
    /// The directory the report was collected for.
    pub target: String,

    /// Reference policy used for percentages.
    pub reference: ReferencePolicy,

    /// Reference value in bytes.
    pub reference_size: u64,

    /// Bar width in characters.
    pub bar_width: usize,

    /// One entry per rendered line, in report order.
    pub entries: Vec<JsonEntry>,
}

/// A single report entry in the JSON output.
#[derive(Serialize, Debug)]
pub struct JsonEntry {
    /// Path as reported by the collector.
    pub path: String,

    /// Size in bytes.
    pub size: u64,

    /// Human-readable formatted size (e.g. `"1.50 KiB"`).
    pub size_formatted: String,

    /// Share of the reference value, `null` when no bar was drawn.
    pub percent: Option<f64>,

    /// The bar graph, `null` when no bar was drawn.
    pub bar: Option<String>,

    /// Whether this entry is the target directory itself.
    pub is_target: bool,
}

impl JsonOutput {
    /// Build the JSON document from rendered report lines.
    #[must_use]
    pub fn from_report(
        target: &str,
        options: &ReportOptions,
        reference_size: u64,
        lines: &[ReportLine],
    ) -> Self {
        Self {
            target: target.to_string(),
            reference: options.reference,
            reference_size,
            bar_width: options.bar_width,
            entries: lines.iter().map(JsonEntry::from_line).collect(),
        }
    }
}

impl JsonEntry {
    /// Convert a [`ReportLine`] into a [`JsonEntry`].
    #[must_use]
    pub fn from_line(line: &ReportLine) -> Self {
        Self {
            path: line.path.clone(),
            size: line.size,
            size_formatted: format_size(line.size, BINARY),
            percent: line.percent,
            bar: line.bar.clone(),
            is_target: line.is_target,
        }
    }
}
