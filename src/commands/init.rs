use crate::config::{AuditConfig, CONFIG_FILE_NAME};
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

const HEADER: &str = "\
# aeoscope configuration
#
# Weights in each [weights.*] table are normalized to sum to 1.
# Invalid weights fall back to the defaults with a warning.

";

/// Default configuration rendered as TOML.
pub fn default_config_toml() -> Result<String> {
    let body = toml::to_string_pretty(&AuditConfig::default())?;
    Ok(format!("{HEADER}{body}"))
}

/// Write `.aeoscope.toml` into `dir`, refusing to overwrite unless `force`.
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, &default_config_toml()?)?;
    tracing::info!(path = %config_path.display(), "wrote default configuration");
    Ok(config_path)
}
