//! Loading and resolution of theme configuration fragment chains.
//!
//! Fragments are JSON files deserialized into [`ThemeConfig`] and merged in
//! argument order: later fragments override earlier ones key-by-key. The
//! merged result is validated before it is handed to scanning or emitted.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::theme::{merge_chain, ThemeConfig};

/// File names probed when no explicit --config flags are given
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["theme.config.json", "windlass.config.json"];

/// Load and deserialize a single configuration fragment
pub fn load_fragment(path: &Path) -> Result<ThemeConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Probe the project root for a default configuration file
pub fn discover_default_config(root: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|candidate| candidate.is_file())
}

/// Load an ordered fragment chain and merge it into one effective config.
/// The merged result must declare at least one content glob
#[must_use = "this returns the resolved configuration which should be used"]
pub fn resolve_chain(paths: &[PathBuf]) -> Result<ThemeConfig, ConfigError> {
    let mut fragments = Vec::with_capacity(paths.len());
    for path in paths {
        fragments.push(load_fragment(path)?);
    }

    let merged = merge_chain(fragments);

    if merged.content.is_empty() {
        return Err(ConfigError::NoContentGlobs);
    }

    Ok(merged)
}
