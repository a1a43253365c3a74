use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$SMARTSPEND_HOME`, or `~/.smartspend`.
pub fn smartspend_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("SMARTSPEND_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".smartspend"))
}

pub fn ensure_smartspend_home() -> Result<PathBuf> {
    let dir = smartspend_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_data_dir() -> Result<PathBuf> {
    Ok(smartspend_home()?.join("data"))
}
