use std::{env, path::PathBuf};

use anyhow::{bail, Result};

/// Resolves the project root. Every document daybook reads or writes is relative to it.
pub fn resolve_project_root(dir: Option<PathBuf>) -> Result<PathBuf> {
    let path = match dir {
        Some(path) => path,
        None => env::current_dir()?,
    };

    if !path.is_dir() {
        bail!("Project directory {path:?} does not exist");
    }
    Ok(path)
}
