//! Report rendering options.
//!
//! This module defines how sizes are turned into percentages (the reference
//! policy) and how each report line is laid out.

use clap::ValueEnum;
use serde::Serialize;

/// Default width of the bar graph, in characters.
pub const DEFAULT_BAR_WIDTH: usize = 20;

/// Default character used for the filled part of the bar.
pub const DEFAULT_FILL: char = '=';

/// Denominator used when converting a size into a percentage.
///
/// The two policies produce materially different reports: with `Total` the
/// bars of all entries add up to the whole width, with `Max` the largest entry
/// always gets a full bar.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePolicy {
    /// Sum of every size in the table, the target directory included
    #[default]
    Total,

    /// Largest single size in the table, the target directory included
    Max,
}

/// Options controlling a single report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    /// Format sizes as `1.5K`, `3.0M`, ... instead of raw byte counts
    pub human_readable: bool,

    /// Width of the bar graph in characters (must be greater than zero)
    pub bar_width: usize,

    /// How the percentage denominator is chosen
    pub reference: ReferencePolicy,

    /// Print the target directory's own line without a bar
    pub skip_target: bool,

    /// Character used for the filled part of the bar
    pub fill: char,

    /// Hide child entries smaller than this many bytes (0 shows everything)
    pub min_size: u64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            human_readable: false,
            bar_width: DEFAULT_BAR_WIDTH,
            reference: ReferencePolicy::default(),
            skip_target: false,
            fill: DEFAULT_FILL,
            min_size: 0,
        }
    }
}
