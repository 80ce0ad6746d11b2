//! Settings file discovery and loading.

use crate::config::schema::NbmendConfig;
use crate::error::{NbmendError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the settings file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".nbmend.yml";

/// Find the settings file for a working directory.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    let path = root.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single settings file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<NbmendConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            NbmendError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            NbmendError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`NbmendConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<NbmendConfig> {
    if content.trim().is_empty() {
        return Ok(NbmendConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| NbmendError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load settings with optional path override.
///
/// An explicit `config_override` must exist. Without one, `.nbmend.yml`
/// in `root` is used when present and defaults apply otherwise.
pub fn load_config(root: &Path, config_override: Option<&Path>) -> Result<NbmendConfig> {
    if let Some(override_path) = config_override {
        return load_config_file(override_path);
    }

    match find_config(root) {
        Some(path) => {
            tracing::debug!("Loading settings from {}", path.display());
            load_config_file(&path)
        }
        None => Ok(NbmendConfig::default()),
    }
}
