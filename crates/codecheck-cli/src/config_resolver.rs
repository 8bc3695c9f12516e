//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path; `.json` means the legacy format)
//! 2. `{root}/codecheck.toml` or `{root}/.codecheck.toml`
//! 3. `{root}/.synconfig.json` with its sibling `.rules.json` (legacy format)
//! 4. `~/.codecheck/config.toml` (global fallback)
//! 5. No config found → defaults

use anyhow::{Context, Result};
use codecheck_core::{legacy, Config};
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the scan root.
    Project(PathBuf),
    /// Legacy `.synconfig.json` found in the scan root.
    Legacy(PathBuf),
    /// Loaded from the global config directory (`~/.codecheck/`).
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Legacy(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }

    /// Returns `true` if the config uses the two-file JSON format.
    #[must_use]
    pub fn is_legacy(&self) -> bool {
        match self {
            Self::Legacy(_) => true,
            Self::Explicit(p) => p.extension().is_some_and(|ext| ext == "json"),
            _ => false,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file (or, for the legacy format, either file)
    /// cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::warn!("No configuration found; no rules will be checked");
            return Ok(Config::default());
        };
        if self.is_global() {
            tracing::info!("Using global config: {}", path.display());
        }

        if self.is_legacy() {
            let rules = legacy::rules_path_for(path);
            legacy::from_files(path, &rules).with_context(|| {
                format!(
                    "Failed to load legacy config: {} + {}",
                    path.display(),
                    rules.display()
                )
            })
        } else {
            Config::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))
        }
    }
}

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["codecheck.toml", ".codecheck.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(root: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(root, explicit, global_config_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(root: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    for name in PROJECT_CONFIG_NAMES {
        let candidate = root.join(name);
        if candidate.exists() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    let synconfig = root.join(legacy::SYNCONFIG_FILE);
    if synconfig.exists() {
        tracing::debug!("Found legacy config: {}", synconfig.display());
        return ConfigSource::Legacy(synconfig);
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Returns the global config directory path.
///
/// Resolution: `$CODECHECK_CONFIG_DIR` > `~/.codecheck/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("CODECHECK_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".codecheck"))
}
