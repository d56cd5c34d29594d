//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! API base URL, request timeout, where the session is stored, and the last
//! email used to sign in.
//!
//! Configuration is stored at `~/.config/medioambiente-rd/config.json`.
//! `MEDIOAMBIENTE_API_URL` and `MEDIOAMBIENTE_STORAGE` override the file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{ApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::auth::{FileStore, KeyValueStore, KeyringStore, MemoryStore, SessionStore};

/// Application name used for config/data directory paths
const APP_NAME: &str = "medioambiente-rd";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const ENV_API_URL: &str = "MEDIOAMBIENTE_API_URL";
pub const ENV_STORAGE: &str = "MEDIOAMBIENTE_STORAGE";

/// Where the session entries live
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Keyring,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "keyring" => Ok(StorageBackend::Keyring),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow::anyhow!("Unknown storage backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub storage: StorageBackend,
    pub last_email: Option<String>,
}

impl Config {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            debug!(url = %url, "API URL overridden from environment");
            self.api_base_url = Some(url);
        }
        if let Some(storage) = lookup(ENV_STORAGE).filter(|v| !v.trim().is_empty()) {
            self.storage = storage.parse()?;
        }
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the file-backed session store
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn api_client(&self) -> Result<ApiClient> {
        ApiClient::with_settings(self.base_url(), self.timeout())
            .context("Failed to create API client")
    }

    /// Key-value backend selected by `storage`
    pub fn key_value_store(&self) -> Result<Arc<dyn KeyValueStore>> {
        let store: Arc<dyn KeyValueStore> = match self.storage {
            StorageBackend::File => Arc::new(FileStore::new(self.data_dir()?)),
            StorageBackend::Keyring => Arc::new(KeyringStore::new()),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        };
        Ok(store)
    }

    pub fn session_store(&self) -> Result<SessionStore> {
        Ok(SessionStore::new(self.key_value_store()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.storage, StorageBackend::File);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sub").join(CONFIG_FILE);

        let config = Config {
            api_base_url: Some("http://localhost:8080/def".into()),
            request_timeout_secs: Some(5),
            storage: StorageBackend::Keyring,
            last_email: Some("user@test.com".into()),
        };
        config.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.base_url(), "http://localhost:8080/def");
        assert_eq!(loaded.timeout(), Duration::from_secs(5));
        assert_eq!(loaded.storage, StorageBackend::Keyring);
        assert_eq!(loaded.last_email.as_deref(), Some("user@test.com"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = Config::load_from(&dir.path().join("nope.json")).expect("load");
        assert!(loaded.api_base_url.is_none());
    }

    #[test]
    fn test_storage_parses_lowercase_json() {
        let config: Config = serde_json::from_str(r#"{"storage":"memory"}"#).expect("parse");
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_overrides(|key| match key {
                ENV_API_URL => Some("http://127.0.0.1:9000".to_string()),
                ENV_STORAGE => Some("Memory".to_string()),
                _ => None,
            })
            .expect("overrides");
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.storage, StorageBackend::Memory);

        let err = config.apply_env_overrides(|key| {
            (key == ENV_STORAGE).then(|| "floppy".to_string())
        });
        assert!(err.is_err());
    }

    #[test]
    fn test_memory_backend_builds_session_store() {
        let config = Config {
            storage: StorageBackend::Memory,
            ..Config::default()
        };
        let sessions = config.session_store().expect("store");
        assert!(sessions.load().is_none());
    }
}
