//! Configuration for rendering disk usage reports.
//!
//! - [`report`] holds the runtime options the renderer consumes.
//! - [`file`] loads persistent defaults from `~/.config/duim/config.toml`.

pub mod file;
pub mod report;

pub use file::FileConfig;
pub use report::{DEFAULT_BAR_WIDTH, DEFAULT_FILL, ReferencePolicy, ReportOptions};
