//! User configuration.
//!
//! Read from a TOML file; every key is optional:
//!
//! ```toml
//! tab_width = 4
//! indent_column = 24
//! strip_io_suffix = true
//! ```
//!
//! An explicit `--config` path wins, then `$HOME/.config/vcodegen/config.toml`,
//! then the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use vcodegen_core::Indent;

pub const CONFIG_FILE_NAME: &str = "config.toml";

fn default_tab_width() -> usize {
    Indent::DEFAULT_TAB_WIDTH
}
fn default_indent_column() -> usize {
    Indent::DEFAULT_INDENT_COLUMN
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Width of a tab stop in columns (default: 4)
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Column the identifier of an aligned declaration starts at (default: 24)
    #[serde(default = "default_indent_column")]
    pub indent_column: usize,

    /// Drop `_i`/`_o`-style suffixes from testbench signals and instance
    /// connections (default: true)
    #[serde(default = "default_true")]
    pub strip_io_suffix: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tab_width: default_tab_width(),
            indent_column: default_indent_column(),
            strip_io_suffix: true,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the configuration in effect: `explicit` if given (it must exist),
    /// otherwise the user config under `home` if present, otherwise defaults.
    pub fn discover(explicit: Option<&Path>, home: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match home.map(user_config_path) {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tab_width == 0 {
            bail!("tab_width must be at least 1");
        }
        Ok(())
    }

    pub fn indent(&self) -> Indent {
        Indent::new(self.tab_width, self.indent_column)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Get the user's home directory
pub fn home_dir() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

pub fn user_config_dir(home: &Path) -> PathBuf {
    home.join(".config").join("vcodegen")
}

pub fn user_config_path(home: &Path) -> PathBuf {
    user_config_dir(home).join(CONFIG_FILE_NAME)
}

/// Write the default configuration to `dir/config.toml`, creating `dir` if
/// needed. An existing file is only replaced with `force`.
pub fn write_template(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    fs::write(&path, Config::default().to_toml()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote config template {}", path.display());
    Ok(path)
}
