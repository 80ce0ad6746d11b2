//! Settings file schema.
//!
//! These structs map to the optional `.nbmend.yml` file.

use serde::Deserialize;

/// Root structure of `.nbmend.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NbmendConfig {
    /// Global settings
    pub settings: Settings,
}

/// Settings that apply to every run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Output mode used when no `--verbose`/`--quiet` flag is given
    pub default_output: OutputMode,

    /// Write `<notebook>.bak` before rewriting a repaired notebook
    pub backup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_output: OutputMode::Normal,
            backup: true,
        }
    }
}

/// Output verbosity mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    #[default]
    Normal,
    Quiet,
    Silent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_backup() {
        let config = NbmendConfig::default();
        assert!(config.settings.backup);
        assert_eq!(config.settings.default_output, OutputMode::Normal);
    }

    #[test]
    fn parses_full_settings() {
        let yaml = "settings:\n  default_output: quiet\n  backup: false\n";
        let config: NbmendConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.settings.backup);
        assert_eq!(config.settings.default_output, OutputMode::Quiet);
    }

    #[test]
    fn partial_settings_keep_defaults() {
        let yaml = "settings:\n  default_output: verbose\n";
        let config: NbmendConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.settings.backup);
        assert_eq!(config.settings.default_output, OutputMode::Verbose);
    }

    #[test]
    fn rejects_unknown_keys() {
        let yaml = "settings:\n  backups: false\n";
        assert!(serde_yaml::from_str::<NbmendConfig>(yaml).is_err());
    }

    #[test]
    fn rejects_unknown_output_mode() {
        let yaml = "settings:\n  default_output: loud\n";
        assert!(serde_yaml::from_str::<NbmendConfig>(yaml).is_err());
    }
}
