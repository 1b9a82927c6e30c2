//! Application configuration management.
//!
//! Holds the API base URL, the storage backend for the credential slot,
//! an optional request timeout and the last identifier used to sign in.
//!
//! Configuration is stored at `~/.config/taskdeck/config.json`.
//! `TASKDECK_API_URL` and `TASKDECK_STORAGE` override the file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::DEFAULT_BASE_URL;
use crate::auth::{FileStore, KeyValueStore, KeyringStore, MemoryStore, StorageBackend};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "taskdeck";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const API_URL_ENV: &str = "TASKDECK_API_URL";
pub const STORAGE_ENV: &str = "TASKDECK_STORAGE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub storage: StorageBackend,
    pub request_timeout_secs: Option<u64>,
    pub last_identifier: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            storage: StorageBackend::default(),
            request_timeout_secs: None,
            last_identifier: None,
        }
    }
}

impl Config {
    /// Load the config file (defaults when absent), then apply environment
    /// overrides.
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        config.with_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(STORAGE_ENV).ok(),
        )
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Invalid config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply environment-style overrides. Blank values are ignored.
    pub fn with_overrides(mut self, api_url: Option<String>, storage: Option<String>) -> Result<Self> {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            debug!(url = %url, "API base URL overridden from environment");
            self.api_base_url = url.trim().to_string();
        }
        if let Some(storage) = storage.filter(|s| !s.trim().is_empty()) {
            self.storage = storage
                .parse()
                .with_context(|| format!("Invalid {}", STORAGE_ENV))?;
        }
        Ok(self)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Open the backend that holds the credential slot.
    pub fn open_storage(&self) -> Result<Arc<dyn KeyValueStore>> {
        let storage: Arc<dyn KeyValueStore> = match self.storage {
            StorageBackend::File => Arc::new(FileStore::new(self.cache_dir()?)),
            StorageBackend::Keyring => Arc::new(KeyringStore),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        };
        Ok(storage)
    }
}
