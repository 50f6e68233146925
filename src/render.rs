//! Turning a size table into report lines with bar graphs.
//!
//! Each entry's size is divided by a reference value (the table's total or
//! its largest entry, see [`ReferencePolicy`]) to get a percentage, and the
//! percentage is bucketed into a fixed-width bar:
//!
//! ```text
//! 200      /root/x  ==
//! 400      /root/y  ===
//! ```

use std::fmt;

use colored::Colorize;

use crate::{
    config::{DEFAULT_FILL, ReferencePolicy, ReportOptions},
    error::{DuError, Result},
    table::SizeTable,
    utils::human_readable_size,
};

/// One rendered line of the report.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportLine {
    /// Path as reported by the collector
    pub path: String,

    /// Size in bytes
    pub size: u64,

    /// Size as printed: raw bytes or human-readable
    pub size_display: String,

    /// Share of the reference value, `None` when no bar is drawn
    pub percent: Option<f64>,

    /// Bar graph, `None` when no bar is drawn
    pub bar: Option<String>,

    /// Whether this line is the target directory itself
    pub is_target: bool,
}

impl ReportLine {
    /// The line with the bar highlighted for terminal output.
    ///
    /// Honors `colored`'s global override, so the result is plain when
    /// coloring is disabled.
    #[must_use]
    pub fn colorized(&self) -> String {
        let path = if self.is_target {
            self.path.bold().to_string()
        } else {
            self.path.clone()
        };

        match &self.bar {
            Some(bar) => format!("{:<8} {path}  {}", self.size_display, bar.green()),
            None => format!("{:<8} {path}", self.size_display),
        }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bar {
            Some(bar) => write!(f, "{:<8} {}  {bar}", self.size_display, self.path),
            None => write!(f, "{:<8} {}", self.size_display, self.path),
        }
    }
}

/// Convert a percentage into a bar of exactly `width` characters using `=`.
///
/// # Errors
///
/// Returns [`DuError::PercentRange`] unless `0 <= percent <= 100`.
pub fn percent_to_graph(percent: f64, width: usize) -> Result<String> {
    percent_to_graph_with(percent, width, DEFAULT_FILL)
}

/// Convert a percentage into a bar of exactly `width` characters.
///
/// The filled part is `round(percent / 100 * width)` characters of `fill`,
/// rounding halves away from zero; the rest is spaces.
///
/// # Errors
///
/// Returns [`DuError::PercentRange`] unless `0 <= percent <= 100`. NaN is
/// out of range.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn percent_to_graph_with(percent: f64, width: usize, fill: char) -> Result<String> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(DuError::PercentRange(percent));
    }

    let filled = ((percent / 100.0 * width as f64).round() as usize).min(width);

    let mut bar = String::with_capacity(width);
    bar.extend(std::iter::repeat_n(fill, filled));
    bar.extend(std::iter::repeat_n(' ', width - filled));

    Ok(bar)
}

/// `size` as a percentage of `reference`.
///
/// A zero reference yields NaN (or infinity), which the bar conversion
/// rejects as out of range.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage(size: u64, reference: u64) -> f64 {
    size as f64 / reference as f64 * 100.0
}

/// The denominator for `table` under `policy`.
#[must_use]
pub fn reference_value(table: &SizeTable, policy: ReferencePolicy) -> u64 {
    match policy {
        ReferencePolicy::Total => table.total(),
        ReferencePolicy::Max => table.max(),
    }
}

/// Whether two collector paths name the same directory, ignoring trailing separators.
fn same_path(a: &str, b: &str) -> bool {
    fn trimmed(p: &str) -> &str {
        let t = p.trim_end_matches('/');
        if t.is_empty() { p } else { t }
    }

    a == b || trimmed(a) == trimmed(b)
}

/// Render every entry of `table` as a report line, in table order.
///
/// `target` is the directory the table was collected for; its entry is drawn
/// without a bar when [`ReportOptions::skip_target`] is set. Child entries
/// smaller than [`ReportOptions::min_size`] are left out but still count
/// towards the reference value.
///
/// # Errors
///
/// - [`DuError::InvalidInput`] if the bar width is zero
/// - [`DuError::PercentRange`] if any percentage falls outside `[0, 100]`,
///   which happens when the reference value is zero
///
/// Any error aborts the whole report.
pub fn render(
    table: &SizeTable,
    target: &str,
    options: &ReportOptions,
) -> Result<Vec<ReportLine>> {
    if options.bar_width == 0 {
        return Err(DuError::InvalidInput(
            "bar width must be greater than zero".to_string(),
        ));
    }

    let reference = reference_value(table, options.reference);
    log::debug!(
        "Rendering {} entries against {:?} reference of {reference} bytes",
        table.len(),
        options.reference
    );

    let mut lines = Vec::with_capacity(table.len());

    for entry in table {
        let is_target = same_path(&entry.path, target);

        if !is_target && entry.size < options.min_size {
            log::trace!("Hiding {} ({} bytes)", entry.path, entry.size);
            continue;
        }

        let size_display = if options.human_readable {
            human_readable_size(entry.size)
        } else {
            entry.size.to_string()
        };

        let (percent, bar) = if is_target && options.skip_target {
            (None, None)
        } else {
            let percent = percentage(entry.size, reference);
            let bar = percent_to_graph_with(percent, options.bar_width, options.fill)?;
            (Some(percent), Some(bar))
        };

        lines.push(ReportLine {
            path: entry.path.clone(),
            size: entry.size,
            size_display,
            percent,
            bar,
            is_target,
        });
    }

    // A bar-less target is a header: it goes first regardless of where
    // the collector listed it (`du` prints it last).
    if options.skip_target
        && let Some(pos) = lines.iter().position(|line| line.is_target)
    {
        lines[..=pos].rotate_right(1);
    }

    Ok(lines)
}
