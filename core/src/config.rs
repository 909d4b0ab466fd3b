//! Scoring settings discovery and loading
//!
//! Settings are read from a TOML file. Every key is optional; absent keys
//! keep their defaults. The default location is
//! `<config_dir>/fragstats/scoring.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use fragstats_types::ScoringSettings;

use crate::error::ConfigError;

const SETTINGS_FILE: &str = "scoring.toml";

/// Get the default settings path (e.g., ~/.config/fragstats/scoring.toml)
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("fragstats").join(SETTINGS_FILE))
}

/// Parse settings from TOML text.
pub fn parse_settings(text: &str, path: &Path) -> Result<ScoringSettings, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load settings from an explicit file. A missing file is an error.
pub fn load_settings(path: &Path) -> Result<ScoringSettings, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = parse_settings(&text, path)?;
    tracing::info!(path = %path.display(), "Loaded scoring settings");
    Ok(settings)
}

/// Load an explicit settings file, or the default one if it exists, or
/// fall back to built-in defaults.
pub fn resolve_settings(explicit: Option<&Path>) -> Result<ScoringSettings, ConfigError> {
    if let Some(path) = explicit {
        return load_settings(path);
    }
    match default_settings_path() {
        Some(path) if path.is_file() => load_settings(&path),
        _ => {
            tracing::debug!("No settings file, using defaults");
            Ok(ScoringSettings::default())
        }
    }
}
