//! Persistent client configuration
//!
//! Settings are stored as pretty JSON in `<config dir>/modchat/config.json`.
//! Loading never fails: a missing or unreadable file yields defaults.

pub mod settings;
pub mod theme;

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME};
use crate::i18n::{t, t_args};

pub use settings::Settings;

/// File permissions for the config file on Unix (owner read/write only)
#[cfg(unix)]
const CONFIG_FILE_MODE: u32 = 0o600;

/// Application configuration
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// User preferences, keyset and stand-in service switches
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Get the platform-specific config file path
    ///
    /// Returns None if the config directory cannot be determined.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from disk, or return defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load config from a specific file, or return defaults
    pub fn load_from(path: &Path) -> Self {
        if path.exists()
            && let Ok(contents) = fs::read_to_string(path)
        {
            match serde_json::from_str::<Config>(&contents) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config file");
                }
            }
        }

        Self::default()
    }

    /// Save config to disk with restrictive permissions
    ///
    /// Creates the config directory if it doesn't exist. The file may hold
    /// keyset values, so on Unix it is made owner read/write only.
    pub fn save(&self) -> Result<(), String> {
        let path = Self::config_path().ok_or_else(|| t("config-save-no-config-dir"))?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                t_args("config-save-create-dir-failed", &[("error", &e.to_string())])
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| {
            t_args("config-save-serialize-failed", &[("error", &e.to_string())])
        })?;

        fs::write(path, json)
            .map_err(|e| t_args("config-save-write-failed", &[("error", &e.to_string())]))?;

        #[cfg(unix)]
        Self::set_config_permissions(path)?;

        Ok(())
    }

    /// Set config file permissions to owner read/write only on Unix systems
    #[cfg(unix)]
    fn set_config_permissions(path: &Path) -> Result<(), String> {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(path)
            .map_err(|e| t_args("config-save-write-failed", &[("error", &e.to_string())]))?
            .permissions();
        perms.set_mode(CONFIG_FILE_MODE);

        fs::set_permissions(path, perms)
            .map_err(|e| t_args("config-save-write-failed", &[("error", &e.to_string())]))
    }
}
