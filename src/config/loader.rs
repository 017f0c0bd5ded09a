use std::fs;
use std::path::{Path, PathBuf};

use super::core::AuditConfig;
use super::scoring::ScoringWeights;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".aeoscope.toml";

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<AuditConfig, String> {
    let mut config = toml::from_str::<AuditConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))?;

    // Validate and normalize scoring weights
    if let Err(e) = config.weights.validate() {
        tracing::warn!("Invalid scoring weights: {}. Using defaults.", e);
        config.weights = ScoringWeights::default();
    } else {
        config.weights.normalize();
    }

    Ok(config)
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<AuditConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Discover `.aeoscope.toml` from `start` upwards, falling back to defaults.
pub fn discover_config(start: PathBuf) -> AuditConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_default()
}

/// Load configuration: an explicit path must exist and parse, otherwise the
/// working directory and its ancestors are searched.
pub fn load_config(explicit: Option<&Path>) -> Result<AuditConfig> {
    match explicit {
        Some(path) => {
            let contents = fs::read_to_string(path).map_err(|e| {
                Error::Configuration(format!("cannot read {}: {e}", path.display()))
            })?;
            parse_and_validate_config(&contents).map_err(Error::Configuration)
        }
        None => {
            let current = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Ok(discover_config(current))
        }
    }
}
