//! Client configuration consumed by the bootstrap sequence

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Format applied to mod names shown under ingredient tooltips.
pub const DEFAULT_MOD_NAME_FORMAT: &str = "§9§o{modName}";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Log every ingredient while the ingredient registry is built
    pub debug_mode: bool,
    /// Tooltip format for mod names, empty to disable
    pub mod_name_format: String,
    /// Where bookmarks are persisted, if anywhere
    pub bookmarks_file: Option<PathBuf>,
    /// Number of columns in the ingredient list overlay
    pub max_columns: usize,
    /// Whether `@` search tokens match mod ids
    pub search_mod_ids: bool,
    /// Set once another mod has taken over mod name display
    #[serde(skip)]
    mod_name_format_overridden: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            mod_name_format: DEFAULT_MOD_NAME_FORMAT.to_string(),
            bookmarks_file: None,
            max_columns: 9,
            search_mod_ids: true,
            mod_name_format_overridden: false,
        }
    }
}

impl ClientConfig {
    /// Load configuration from file with format detection
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: ClientConfig = load_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        save_file(self, path.as_ref())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.max_columns) {
            return Err(ConfigError::Invalid(format!(
                "Max columns must be between 1 and 100, got {}",
                self.max_columns
            )));
        }

        if !self.mod_name_format.is_empty() && !self.mod_name_format.contains("{modName}") {
            return Err(ConfigError::Invalid(
                "Mod name format must contain {modName}".to_string(),
            ));
        }

        if let Some(path) = &self.bookmarks_file {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("Bookmarks file cannot be empty".to_string()));
            }
        }

        Ok(())
    }

    /// Disables mod name display when another plugin claimed it.
    ///
    /// Returns true when the format was cleared by this call.
    pub fn check_for_mod_name_format_override(&mut self, claims: &[String]) -> bool {
        if self.mod_name_format_overridden || self.mod_name_format.is_empty() {
            return false;
        }

        match claims.first() {
            Some(owner) => {
                tracing::info!(
                    "Mod name display is handled by '{}', disabling the mod name format",
                    owner
                );
                self.mod_name_format.clear();
                self.mod_name_format_overridden = true;
                true
            }
            None => false,
        }
    }

    pub fn is_mod_name_format_overridden(&self) -> bool {
        self.mod_name_format_overridden
    }

    /// Render a mod name with the configured format
    pub fn format_mod_name(&self, mod_name: &str) -> Option<String> {
        if self.mod_name_format.is_empty() {
            return None;
        }
        Some(self.mod_name_format.replace("{modName}", mod_name))
    }
}

/// Persisted hide-mode state: which ingredients the user hid and whether the
/// edit overlay is currently on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HideModeConfig {
    pub edit_mode_enabled: bool,
    pub hidden: BTreeSet<String>,
}

/// Hide-mode state shared by the filter, helpers and input handler after bootstrap.
pub type SharedHideMode = Arc<RwLock<HideModeConfig>>;

impl HideModeConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_file(path.as_ref())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        save_file(self, path.as_ref())
    }

    pub fn is_hidden(&self, uid: &str) -> bool {
        self.hidden.contains(uid)
    }

    /// Flip the hidden state of an ingredient uid, returning the new state
    pub fn toggle_hidden(&mut self, uid: &str) -> bool {
        if self.hidden.remove(uid) {
            false
        } else {
            self.hidden.insert(uid.to_string());
            true
        }
    }

    pub fn into_shared(self) -> SharedHideMode {
        Arc::new(RwLock::new(self))
    }
}

fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))?;

    match ConfigFormat::from_extension(path) {
        ConfigFormat::Json => serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("JSON parse error: {}", e))),
        ConfigFormat::Toml => toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("TOML parse error: {}", e))),
    }
}

fn save_file<T: Serialize>(value: &T, path: &Path) -> Result<(), ConfigError> {
    let content = match ConfigFormat::from_extension(path) {
        ConfigFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| ConfigError::ParseFailed(format!("JSON serialize error: {}", e)))?,
        ConfigFormat::Toml => toml::to_string_pretty(value)
            .map_err(|e| ConfigError::ParseFailed(format!("TOML serialize error: {}", e)))?,
    };

    std::fs::write(path, content)
        .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))
}

/// Configuration file format detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_extension(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert!(!config.debug_mode);
        assert_eq!(config.mod_name_format, DEFAULT_MOD_NAME_FORMAT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_client_config_validation() {
        let mut config = ClientConfig::default();

        config.max_columns = 0;
        assert!(config.validate().is_err());

        config.max_columns = 12;
        config.mod_name_format = "§9".to_string();
        assert!(config.validate().is_err());

        config.mod_name_format = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mod_name_format_override() {
        let mut config = ClientConfig::default();
        assert_eq!(config.format_mod_name("Minecraft").as_deref(), Some("§9§oMinecraft"));

        assert!(!config.check_for_mod_name_format_override(&[]));
        assert!(!config.is_mod_name_format_overridden());

        assert!(config.check_for_mod_name_format_override(&["waila".to_string()]));
        assert!(config.is_mod_name_format_overridden());
        assert_eq!(config.format_mod_name("Minecraft"), None);

        // Second claim is a no-op
        assert!(!config.check_for_mod_name_format_override(&["hwyla".to_string()]));
    }

    #[test]
    fn test_file_operations() {
        let mut config = ClientConfig::default();
        config.debug_mode = true;
        config.max_columns = 12;

        let toml_file = NamedTempFile::with_suffix(".toml").unwrap();
        config.save_to_file(toml_file.path()).unwrap();
        let loaded = ClientConfig::load_from_file(toml_file.path()).unwrap();
        assert_eq!(config, loaded);

        let mut json_file = NamedTempFile::with_suffix(".json").unwrap();
        json_file
            .write_all(br#"{ "debug_mode": true, "max_columns": 20 }"#)
            .unwrap();
        json_file.flush().unwrap();

        let loaded = ClientConfig::load_from_file(json_file.path()).unwrap();
        assert!(loaded.debug_mode);
        assert_eq!(loaded.max_columns, 20);
        assert_eq!(loaded.mod_name_format, DEFAULT_MOD_NAME_FORMAT);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        file.write_all(b"max_columns = 0\n").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            ClientConfig::load_from_file(file.path()),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ClientConfig::load_from_file("/nonexistent/almanac.toml"),
            Err(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_hide_mode_toggle_and_persist() {
        let mut hide_mode = HideModeConfig::default();
        assert!(hide_mode.toggle_hidden("item:minecraft:bedrock"));
        assert!(hide_mode.is_hidden("item:minecraft:bedrock"));

        let file = NamedTempFile::with_suffix(".json").unwrap();
        hide_mode.save_to_file(file.path()).unwrap();
        let loaded = HideModeConfig::load_from_file(file.path()).unwrap();
        assert_eq!(hide_mode, loaded);

        assert!(!hide_mode.toggle_hidden("item:minecraft:bedrock"));
        assert!(!hide_mode.is_hidden("item:minecraft:bedrock"));
    }
}
