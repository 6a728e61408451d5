//! Writing generated files.
//!
//! Existing files are never replaced unless the caller forces it.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::info;

#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
    force: bool,
}

impl OutputDir {
    pub fn new(root: impl Into<PathBuf>, force: bool) -> Self {
        Self {
            root: root.into(),
            force,
        }
    }

    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Write `contents` to `file_name` under the output directory and return
    /// the path written.
    pub fn write(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.path_of(file_name);
        if path.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }

        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
        Ok(path)
    }
}
