//! `sphera init`: write a starter configuration

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{SpheraConfig, CONFIG_FILE};

/// Write the default configuration to `dir/sphera.toml`
pub fn write_config(dir: &Path, force: bool) -> Result<()> {
    let path = config_path(dir, force)?;
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let content = format!(
        "# Sphera palette configuration\n\n{}",
        SpheraConfig::default().to_toml()?
    );
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote configuration");
    Ok(())
}

fn config_path(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Ok(path)
}
