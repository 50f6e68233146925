//! Optional settings file.
//!
//! duim reads defaults from `<config_dir>/duim/config.toml` (`~/.config` on
//! Linux), or from the file named by `$DUIM_CONFIG`. The file is only ever
//! read; duim never creates or modifies it.
//!
//! Command-line arguments win over the file, and the file wins over the
//! built-in defaults.
//!
//! ```toml
//! target = "~/Projects"
//! human_readable = true
//! length = 30
//! reference = "max"
//! skip_target = false
//! min_size = "1M"
//! fill = "#"
//! du_program = "/usr/bin/du"
//! ignore_du_errors = true
//! color = true
//! ```

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming a settings file to use instead of the default one.
pub const CONFIG_ENV: &str = "DUIM_CONFIG";

/// Settings read from the file. Keys left out stay `None` and fall back to
/// the built-in defaults unless a command-line flag sets them.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default directory to report on
    pub target: Option<PathBuf>,

    /// Whether to print human-readable sizes
    pub human_readable: Option<bool>,

    /// Bar graph width in characters
    pub length: Option<usize>,

    /// Reference policy (`"total"` or `"max"`)
    pub reference: Option<String>,

    /// Whether to print the target directory without a bar
    pub skip_target: Option<bool>,

    /// Hide entries smaller than this size (e.g. `"512K"`, `"1GiB"`)
    pub min_size: Option<String>,

    /// Fill character for the bar graph
    pub fill: Option<char>,

    /// Program used to compute sizes
    pub du_program: Option<PathBuf>,

    /// Continue with partial output when `du` exits unsuccessfully
    pub ignore_du_errors: Option<bool>,

    /// Whether to colorize terminal output
    pub color: Option<bool>,
}

impl FileConfig {
    /// Where settings are read from: `$DUIM_CONFIG` when set and non-empty,
    /// otherwise `<config_dir>/duim/config.toml`.
    ///
    /// `None` only when neither is available (no config directory on this
    /// platform).
    #[must_use]
    pub fn location() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join("duim").join("config.toml")))
    }

    /// Read settings from [`location`](Self::location).
    ///
    /// A missing file means no overrides.
    ///
    /// # Errors
    ///
    /// See [`read`](Self::read).
    pub fn load() -> anyhow::Result<Self> {
        match Self::location() {
            Some(path) => Ok(Self::read(&path)?.unwrap_or_default()),
            None => Ok(Self::default()),
        }
    }

    /// Read settings from `path`, or `None` if there is no file there.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but is unreadable, is not valid TOML, holds
    /// a key duim does not know, or a value of the wrong type.
    pub fn read(path: &Path) -> anyhow::Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No settings file at {}", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Cannot read {}", path.display()));
            }
        };

        let config = toml::from_str(&content)
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        log::debug!("Read settings from {}", path.display());

        Ok(Some(config))
    }

    /// The configured default target, with a leading `~` replaced by the
    /// home directory.
    #[must_use]
    pub fn target_dir(&self) -> Option<PathBuf> {
        self.target.as_deref().map(expand_home)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    let Some(Component::Normal(first)) = components.next() else {
        return path.to_path_buf();
    };
    if first != "~" {
        return path.to_path_buf();
    }
    let Some(home) = dirs::home_dir() else {
        return path.to_path_buf();
    };

    let rest = components.as_path();
    if rest.as_os_str().is_empty() {
        home
    } else {
        home.join(rest)
    }
}
