//! Depth-1 size collection.
//!
//! A [`SizeSource`] produces the raw `size<TAB>path` lines that the
//! [`SizeTable`](crate::table::SizeTable) is built from: one line for the target
//! directory itself and one per immediate child. The production source is
//! [`DuCommand`], which shells out to `du`; [`StaticSource`] serves fixed lines
//! for tests and for callers that already have size data.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::error::{DuError, Result};

/// Default program used to compute directory sizes.
pub const DEFAULT_DU_PROGRAM: &str = "du";

/// Something that can report the size of a directory and its immediate children.
pub trait SizeSource {
    /// Return one raw `size<TAB>path` line per entry, in the order reported.
    ///
    /// # Errors
    ///
    /// Implementations fail with [`DuError::InvalidInput`] when `dir` is not a
    /// directory they can scan, and [`DuError::Collector`] when the underlying
    /// size computation fails.
    fn collect(&self, dir: &Path) -> Result<Vec<String>>;

    /// Bytes per unit in the sizes returned by [`collect`](Self::collect).
    fn block_size(&self) -> u64 {
        1
    }
}

/// Fail with [`DuError::InvalidInput`] unless `path` is an existing directory.
///
/// # Errors
///
/// Returns [`DuError::InvalidInput`] if the path does not exist or is not a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(DuError::InvalidInput(format!(
            "The directory {} is not valid.",
            path.display()
        )))
    }
}

/// Runs `du -d 1 -k <dir>` and returns its output lines.
///
/// `-k` makes both GNU and BSD `du` report 1024-byte blocks, so
/// [`block_size`](SizeSource::block_size) is 1024. The process is waited on
/// without a timeout and its stdout is fully drained before it is dropped.
#[derive(Debug, Clone)]
pub struct DuCommand {
    program: PathBuf,
    ignore_errors: bool,
}

impl Default for DuCommand {
    fn default() -> Self {
        Self::new(DEFAULT_DU_PROGRAM)
    }
}

impl DuCommand {
    /// Create a collector that runs the given `du`-compatible program.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ignore_errors: false,
        }
    }

    /// Accept output from a `du` run that exited unsuccessfully.
    ///
    /// `du` exits non-zero when it cannot read some subdirectory but still
    /// prints sizes for everything it could read. With this enabled, such a
    /// run is logged as a warning instead of failing, as long as it produced
    /// output.
    #[must_use]
    pub const fn with_ignore_errors(mut self, ignore_errors: bool) -> Self {
        self.ignore_errors = ignore_errors;
        self
    }

    /// The program this collector runs.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Whether output from an unsuccessful run is accepted.
    #[must_use]
    pub const fn ignores_errors(&self) -> bool {
        self.ignore_errors
    }

    fn command(&self, dir: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.args(["-d", "1", "-k"]).arg(dir);
        command
    }
}

impl SizeSource for DuCommand {
    fn collect(&self, dir: &Path) -> Result<Vec<String>> {
        ensure_directory(dir)?;

        log::debug!(
            "Running {} -d 1 -k {}",
            self.program.display(),
            dir.display()
        );

        let output = self.command(dir).output().map_err(|e| {
            DuError::Collector(format!(
                "Failed to execute {}: {e}",
                self.program.display()
            ))
        })?;

        let lines = split_lines(&String::from_utf8_lossy(&output.stdout));

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();

            if !self.ignore_errors || lines.is_empty() {
                return Err(DuError::Collector(format!(
                    "{} exited with {}: {stderr}",
                    self.program.display(),
                    output.status
                )));
            }

            log::warn!(
                "{} exited with {}, continuing with partial sizes: {stderr}",
                self.program.display(),
                output.status
            );
        }

        log::debug!("Collected {} entries for {}", lines.len(), dir.display());

        Ok(lines)
    }

    fn block_size(&self) -> u64 {
        1024
    }
}

/// A collector that always returns the same lines.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    lines: Vec<String>,
    block_size: u64,
}

impl StaticSource {
    /// Serve `lines` verbatim with a block size of 1 (sizes are bytes).
    #[must_use]
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            block_size: 1,
        }
    }

    /// Report sizes in units of `block_size` bytes instead.
    #[must_use]
    pub const fn with_block_size(mut self, block_size: u64) -> Self {
        self.block_size = block_size;
        self
    }
}

impl SizeSource for StaticSource {
    fn collect(&self, _dir: &Path) -> Result<Vec<String>> {
        Ok(self.lines.clone())
    }

    fn block_size(&self) -> u64 {
        self.block_size
    }
}

/// Split tool output into lines, dropping blank ones and the line terminator.
fn split_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_split_lines_drops_trailing_newline() {
        let lines = split_lines("4\t/a/b\n12\t/a\n");
        assert_eq!(lines, vec!["4\t/a/b".to_string(), "12\t/a".to_string()]);
    }

    #[test]
    fn test_split_lines_skips_blank_lines() {
        let lines = split_lines("\n4\t/a/b\n\n  \n12\t/a\r\n");
        assert_eq!(lines, vec!["4\t/a/b".to_string(), "12\t/a".to_string()]);
    }

    #[test]
    fn test_split_lines_empty_output() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_ensure_directory_accepts_directory() {
        let tmp = TempDir::new().unwrap();
        assert!(ensure_directory(tmp.path()).is_ok());
    }

    #[test]
    fn test_ensure_directory_rejects_missing_path() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing");

        let err = ensure_directory(&missing).unwrap_err();
        assert!(matches!(err, DuError::InvalidInput(_)));
        assert!(err.to_string().contains("is not valid"));
    }

    #[test]
    fn test_ensure_directory_rejects_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        std::fs::write(&file, "content").unwrap();

        assert!(matches!(
            ensure_directory(&file),
            Err(DuError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_du_command_rejects_non_directory_before_spawning() {
        let source = DuCommand::new("definitely-not-a-real-du-binary");
        let err = source.collect(Path::new("/no/such/directory/here")).unwrap_err();

        assert!(matches!(err, DuError::InvalidInput(_)));
    }

    #[test]
    fn test_du_command_missing_program_is_collector_error() {
        let tmp = TempDir::new().unwrap();
        let source = DuCommand::new("definitely-not-a-real-du-binary");

        let err = source.collect(tmp.path()).unwrap_err();
        assert!(matches!(err, DuError::Collector(_)));
    }

    #[test]
    fn test_du_command_arguments() {
        let source = DuCommand::default();
        let command = source.command(Path::new("/tmp"));
        let args: Vec<_> = command.get_args().collect();

        assert_eq!(command.get_program(), "du");
        assert_eq!(args, vec!["-d", "1", "-k", "/tmp"]);
    }

    #[test]
    fn test_du_command_block_size_is_kibibytes() {
        assert_eq!(DuCommand::default().block_size(), 1024);
    }

    #[test]
    fn test_static_source_returns_lines_verbatim() {
        let source = StaticSource::new(["1\t/a", "2\t/a/b"]);
        let lines = source.collect(Path::new("/ignored")).unwrap();

        assert_eq!(lines, vec!["1\t/a".to_string(), "2\t/a/b".to_string()]);
        assert_eq!(source.block_size(), 1);
    }

    #[test]
    fn test_static_source_with_block_size() {
        let source = StaticSource::new(["1\t/a"]).with_block_size(512);
        assert_eq!(source.block_size(), 512);
    }
}
