use crate::config::paths::AppDir;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Returns `<state dir>/logs/<component>`, creating it when `create` is set.
pub fn prepare_log_directory(component: &str, create: bool) -> Result<PathBuf> {
    let log_dir = AppDir::State.join("logs").join(component);
    if create {
        fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    }
    Ok(log_dir)
}
