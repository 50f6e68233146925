//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments and options using
//! [clap](https://docs.rs/clap/).
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use du_improved::collector::{DEFAULT_DU_PROGRAM, DuCommand};
use du_improved::config::file::FileConfig;
use du_improved::config::{DEFAULT_BAR_WIDTH, DEFAULT_FILL, ReferencePolicy, ReportOptions};
use du_improved::utils::parse_size;

/// Command-line arguments controlling how the report is drawn.
#[derive(Parser, Debug)]
struct ReportArgs {
    /// Display sizes in human-readable format (e.g. 1.5K, 3.0M)
    #[arg(short = 'H', long)]
    human_readable: bool,

    /// Length of the bar graph [default: 20]
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u16).range(1..))]
    length: Option<u16>,

    /// What the bars are relative to [default: total]
    ///
    /// `total` divides each size by the sum of all entries (the target
    /// directory included); `max` divides by the largest entry, so the
    /// biggest one always gets a full bar.
    #[arg(short = 'r', long, value_enum)]
    reference: Option<ReferencePolicy>,

    /// Print the target directory's own line without a bar
    #[arg(long)]
    skip_target: bool,

    /// Hide entries smaller than SIZE (e.g. 512K, 10M, 1GiB)
    ///
    /// Hidden entries still count towards the reference value.
    #[arg(long, value_name = "SIZE")]
    min_size: Option<String>,

    /// Character used to fill the bar [default: =]
    #[arg(long)]
    fill: Option<char>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

/// Command-line arguments controlling size collection.
#[derive(Parser, Debug)]
struct CollectArgs {
    /// Program used to compute directory sizes [default: du]
    #[arg(long = "du", value_name = "PROGRAM")]
    du_program: Option<PathBuf>,

    /// Keep going when du exits with an error but still printed sizes
    ///
    /// du fails when it cannot read some subdirectory. With this flag the
    /// report is drawn from whatever du managed to measure.
    #[arg(long)]
    ignore_du_errors: bool,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect the settings file and the values duim would use
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the settings a report would use, after applying the file and any flags
    Show,
    /// Print where the settings file is read from
    Path,
}

/// Main command-line interface structure.
#[derive(Parser, Debug)]
#[command(name = "duim")]
#[command(about = "DU Improved - Show Disk Usage with Graphs")]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// The target directory to scan [default: current directory]
    target: Option<PathBuf>,

    /// Output the report as a single JSON object for scripting/piping
    #[arg(long)]
    json: bool,

    /// Print debug information to stderr (RUST_LOG overrides)
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Report options
    #[command(flatten)]
    report: ReportArgs,

    /// Collection options
    #[command(flatten)]
    collect: CollectArgs,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    /// Whether `--verbose` was passed.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    /// Whether colored output is enabled.
    ///
    /// `--no-color` wins, then the config file, then `true`.
    #[must_use]
    pub fn color(&self, config: &FileConfig) -> bool {
        !self.report.no_color && config.color.unwrap_or(true)
    }

    /// Resolve the target directory from CLI args, config file, or default.
    ///
    /// Priority: CLI argument > config file `target` > current directory (`.`).
    /// Tilde expansion is applied to paths originating from the config file.
    #[must_use]
    pub fn target(&self, config: &FileConfig) -> PathBuf {
        self.target
            .clone()
            .or_else(|| config.target_dir())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Extract report options from CLI args and config file.
    ///
    /// - **`human_readable`, `skip_target`**: CLI flag `||` config value `||` `false`
    /// - **length, reference, `min_size`, fill**: CLI > config > default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file holds an unknown reference policy,
    /// a zero bar length, or an unparsable minimum size.
    pub fn report_options(&self, config: &FileConfig) -> Result<ReportOptions> {
        let bar_width = match self.report.length {
            Some(length) => usize::from(length),
            None => config.length.unwrap_or(DEFAULT_BAR_WIDTH),
        };
        if bar_width == 0 {
            bail!("Bar length must be greater than zero");
        }

        let reference = match (self.report.reference, config.reference.as_deref()) {
            (Some(policy), _) => policy,
            (None, Some(name)) => ReferencePolicy::from_str(name, true).map_err(|_| {
                anyhow::anyhow!(
                    "Unknown reference policy {name:?} in config file (expected total or max)"
                )
            })?,
            (None, None) => ReferencePolicy::default(),
        };

        let min_size = match self
            .report
            .min_size
            .as_deref()
            .or(config.min_size.as_deref())
        {
            Some(size) => parse_size(size)
                .map_err(|e| anyhow::anyhow!("Invalid minimum size {size:?}: {e}"))?,
            None => 0,
        };

        Ok(ReportOptions {
            human_readable: self.report.human_readable
                || config.human_readable.unwrap_or(false),
            bar_width,
            reference,
            skip_target: self.report.skip_target || config.skip_target.unwrap_or(false),
            fill: self.report.fill.or(config.fill).unwrap_or(DEFAULT_FILL),
            min_size,
        })
    }

    /// Build the size collector from CLI args and config file.
    ///
    /// Priority for the program: CLI `--du` > config `du_program` > `du`.
    #[must_use]
    pub fn collector(&self, config: &FileConfig) -> DuCommand {
        let program = self
            .collect
            .du_program
            .clone()
            .or_else(|| config.du_program.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DU_PROGRAM));

        DuCommand::new(program).with_ignore_errors(
            self.collect.ignore_du_errors || config.ignore_du_errors.unwrap_or(false),
        )
    }
}
