//! Path utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::descriptor::DESCRIPTOR_FILE;
use crate::error::{hints, ClawError};

/// Find the project root by looking for build.claw
pub fn find_project_root() -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("failed to get current directory")?;
    Ok(find_project_root_from(&current_dir)?)
}

/// Find the project root starting from a specific directory
pub fn find_project_root_from(start: &Path) -> Result<PathBuf, ClawError> {
    let mut dir = start;
    loop {
        if dir.join(DESCRIPTOR_FILE).exists() {
            return Ok(dir.to_path_buf());
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => {
                return Err(ClawError::descriptor_error_with_hint(
                    format!(
                        "could not find {DESCRIPTOR_FILE} in {} or any parent directory",
                        start.display()
                    ),
                    None,
                    hints::descriptor(),
                ))
            }
        }
    }
}

/// Ensure a directory exists
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}
