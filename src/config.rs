//! Configuration file support.
//!
//! Shortcuts, visible labels, history size, and log verbosity can be exported
//! to and imported from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action_group::ToolbarLabels;
use crate::error::{Result, ToolbarError};
use crate::history::HistoryConfig;
use crate::keybindings::KeyBindings;

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Log level setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Toolbar configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolbarConfig {
    /// Version of the configuration file format
    pub version: u32,

    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub keybindings: KeyBindings,

    #[serde(default)]
    pub labels: ToolbarLabels,

    #[serde(default)]
    pub history: HistoryConfig,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            keybindings: KeyBindings::default(),
            labels: ToolbarLabels::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl ToolbarConfig {
    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ToolbarError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }
        config.keybindings.validate()?;

        Ok(config)
    }

    /// Read configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "annotation-toolbar.json"
    }

    /// Get the default config file path.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|dir| dir.join("annotation-toolbar").join(Self::default_filename()))
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {:?}", path);
                Some(config)
            }
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::Shortcut;

    #[test]
    fn test_config_json_roundtrip() {
        let mut config = ToolbarConfig::default();
        config.keybindings.save = Shortcut::ctrl("K");
        config.labels.done = "Finish".to_string();
        config.log_level = LogLevel::Debug;

        let json = config.to_json().unwrap();
        assert!(json.contains("\"Ctrl+K\""));
        assert_eq!(ToolbarConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = ToolbarConfig::from_json(r#"{ "version": 1, "labels": { "save": "Sauver" } }"#)
            .unwrap();
        assert_eq!(config.labels.save, "Sauver");
        assert_eq!(config.labels.undo, "Undo");
        assert_eq!(config.keybindings, KeyBindings::default());
        assert_eq!(config.history.max_history, 100);
        assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = ToolbarConfig::from_json(r#"{ "version": 99 }"#).unwrap_err();
        assert!(matches!(
            err,
            ToolbarError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_bad_shortcut_is_parse_error() {
        let err = ToolbarConfig::from_json(
            r#"{ "version": 1, "keybindings": { "save": "Hyper+S", "undo": "Ctrl+Z", "redo": "Ctrl+Y", "draw": "N", "switch_tools_blocker": "Tab" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ToolbarError::Json(_)));
    }

    #[test]
    fn test_shadowed_shortcut_is_rejected() {
        let err = ToolbarConfig::from_json(
            r#"{ "version": 1, "keybindings": { "save": "Ctrl+S", "undo": "Ctrl+Z", "redo": "Ctrl+Shift+Z", "draw": "Ctrl+S", "switch_tools_blocker": "Tab" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ToolbarError::ShortcutConflict { .. }));
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let err = ToolbarConfig::from_file(Path::new("/nonexistent/annotation-toolbar.json"))
            .unwrap_err();
        assert!(matches!(err, ToolbarError::Io(_)));
    }
}
