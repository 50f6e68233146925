//! # du-improved
//!
//! Disk usage, improved. Reports the size of a directory and each of its
//! immediate children, one level deep, with a proportional bar graph next to
//! every entry.
//!
//! The pipeline is strictly sequential:
//!
//! 1. [`collector`] runs a depth-1 size computation (by default `du -d 1 -k`)
//!    and returns its raw `size<TAB>path` lines.
//! 2. [`table`] parses those lines into an ordered [`SizeTable`].
//! 3. [`render`] turns the table into [`ReportLine`]s, one per entry.
//!
//! ## Usage
//!
//! ```bash
//! # Report on the current directory
//! duim
//!
//! # Human-readable sizes and a 40 character bar
//! duim ~/Downloads -H -l 40
//!
//! # Bars relative to the largest entry instead of the sum
//! duim /var --reference max
//! ```

pub mod collector;
pub mod config;
pub mod error;
pub mod output;
pub mod render;
pub mod table;
pub mod utils;

pub use collector::{DuCommand, SizeSource, StaticSource};
pub use config::{ReferencePolicy, ReportOptions};
pub use error::{DuError, Result};
pub use render::{ReportLine, percent_to_graph, render};
pub use table::{SizeEntry, SizeTable};
pub use utils::human_readable_size;
