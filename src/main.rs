//! # duim
//!
//! Disk usage, improved: shows how much space a directory and each of its
//! immediate children take up, with a bar graph next to every entry.
//!
//! ## Usage
//!
//! ```bash
//! # Current directory, raw sizes, 20 character bars
//! duim
//!
//! # Human-readable sizes, 40 character bars
//! duim ~/Downloads -H -l 40
//!
//! # Bars relative to the largest entry, target printed without a bar
//! duim /var --reference max --skip-target
//!
//! # Machine-readable output
//! duim /var --json
//! ```

mod cli;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use du_improved::{
    collector::{DuCommand, SizeSource, ensure_directory},
    config::{FileConfig, ReferencePolicy, ReportOptions},
    output::JsonOutput,
    render::{reference_value, render},
    table::SizeTable,
};
use std::process::exit;

/// Entry point for the duim application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err:#}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Parses arguments, validates the target, then runs collect → build → render
/// and prints the report.
///
/// # Errors
///
/// Returns errors from config handling, target validation, the external size
/// utility, parsing its output, rendering, or JSON serialization.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    init_logging(args.verbose());

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command, &args);
    }

    let json_mode = args.json();
    let file_config = FileConfig::load().unwrap_or_else(|e| {
        log::warn!("{e:#}; continuing with built-in defaults");
        FileConfig::default()
    });

    if !args.color(&file_config) {
        colored::control::set_override(false);
    }

    let target = args.target(&file_config);
    ensure_directory(&target)?;

    let options = args.report_options(&file_config)?;
    let collector = args.collector(&file_config);

    run_report(&collector, &target, &options, json_mode)
}

/// Initialise `env_logger`, defaulting to `debug` with `--verbose` and `warn` otherwise.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Collect, build and render the report for `target`, then print it.
fn run_report(
    source: &dyn SizeSource,
    target: &Path,
    options: &ReportOptions,
    json_mode: bool,
) -> Result<()> {
    let lines = source.collect(target)?;
    let table = SizeTable::build_scaled(&lines, source.block_size())?;

    let target_str = target.to_string_lossy();
    let report = render(&table, &target_str, options)?;

    if json_mode {
        let reference = reference_value(&table, options.reference);
        let output = JsonOutput::from_report(&target_str, options, reference, &report);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in &report {
            println!("{}", line.colorized());
        }
    }

    Ok(())
}

// ── Config subcommand ────────────────────────────────────────────────

fn handle_config_command(cmd: &ConfigCommand, args: &Cli) -> Result<()> {
    let Some(location) = FileConfig::location() else {
        bail!("Could not determine the config directory on this platform");
    };

    match cmd {
        ConfigCommand::Path => println!("{}", location.display()),
        ConfigCommand::Show => {
            // Unlike a report run, a broken file is an error here.
            let file = FileConfig::read(&location)?;
            let found = file.is_some();
            let file = file.unwrap_or_default();

            let settings = Settings {
                target: args.target(&file),
                options: args.report_options(&file)?,
                collector: args.collector(&file),
                color: args.color(&file),
            };

            let status = if found { "" } else { " (not found)" };
            println!("# {}{status}", location.display());
            println!("{settings}");
        }
    }
    Ok(())
}

/// Everything a report run resolves from flags, the settings file and defaults.
struct Settings {
    target: PathBuf,
    options: ReportOptions,
    collector: DuCommand,
    color: bool,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reference = match self.options.reference {
            ReferencePolicy::Total => "total",
            ReferencePolicy::Max => "max",
        };

        writeln!(f, "target = {:?}", self.target.display().to_string())?;
        writeln!(f, "human_readable = {}", self.options.human_readable)?;
        writeln!(f, "length = {}", self.options.bar_width)?;
        writeln!(f, "reference = \"{reference}\"")?;
        writeln!(f, "skip_target = {}", self.options.skip_target)?;
        writeln!(f, "min_size = \"{}\"", self.options.min_size)?;
        writeln!(f, "fill = {:?}", self.options.fill.to_string())?;
        writeln!(
            f,
            "du_program = {:?}",
            self.collector.program().display().to_string()
        )?;
        writeln!(f, "ignore_du_errors = {}", self.collector.ignores_errors())?;
        write!(f, "color = {}", self.color)
    }
}
