//! TOML-based application configuration.
//!
//! Stores the backend selection and onboarding defaults:
//! - `[remote]`: base URL, API key and user id for the remote store;
//!   a configured user id switches the session out of guest mode
//! - `[display]`: starter character name and avatar used by guest
//!   onboarding
//!
//! Configuration is stored at `~/.config/habitquest/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use super::data_dir;
use crate::error::ConfigError;
use crate::identity::Identity;

/// Remote store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// REST root of the relational backend, e.g. `https://x.example.co/rest/v1`.
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    /// Stable identity for the remote store. Absent means guest mode.
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// Display defaults used when seeding a guest profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_character_name")]
    pub character_name: String,
    #[serde(default = "default_avatar")]
    pub avatar: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/habitquest/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_character_name() -> String {
    "Hero".into()
}
fn default_avatar() -> String {
    "🧑‍🚀".into()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            character_name: default_character_name(),
            avatar: default_avatar(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::DirUnavailable(e.to_string()))?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// The identity this configuration selects.
    ///
    /// A configured remote user id means a signed-in session; everything
    /// else runs as guest against the local mirror.
    pub fn identity(&self) -> Identity {
        match self.remote.user_id {
            Some(id) if !self.remote.base_url.is_empty() => Identity::User(id),
            _ => Identity::Guest,
        }
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist. Returns error if the key is
    /// unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "remote.base_url" => self.remote.base_url = value.to_string(),
            "remote.api_key" => self.remote.api_key = value.to_string(),
            "remote.user_id" => {
                if value.is_empty() {
                    self.remote.user_id = None;
                } else {
                    let id = value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("'{value}' is not a UUID"),
                    })?;
                    self.remote.user_id = Some(id);
                }
            }
            "display.character_name" => self.display.character_name = value.to_string(),
            "display.avatar" => self.display.avatar = value.to_string(),
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "unknown config key".to_string(),
                })
            }
        }
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.display.character_name, "Hero");
        assert!(parsed.remote.user_id.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("display.character_name").as_deref(), Some("Hero"));
        assert!(cfg.get("remote.user_id").is_none());
        assert!(cfg.get("remote.missing_key").is_none());
    }

    #[test]
    fn identity_defaults_to_guest() {
        let cfg = Config::default();
        assert_eq!(cfg.identity(), Identity::Guest);
    }

    #[test]
    fn identity_requires_base_url_for_user_mode() {
        let mut cfg = Config::default();
        cfg.remote.user_id = Some(Uuid::new_v4());
        // user id without a base URL still runs as guest
        assert_eq!(cfg.identity(), Identity::Guest);

        cfg.remote.base_url = "https://example.test/rest/v1".to_string();
        assert!(matches!(cfg.identity(), Identity::User(_)));
    }

    #[test]
    fn unknown_set_key_is_rejected() {
        let mut cfg = Config::default();
        let result = cfg.set("display.nonexistent", "x");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn user_id_set_rejects_non_uuid() {
        let mut cfg = Config::default();
        let result = cfg.set("remote.user_id", "not-a-uuid");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
