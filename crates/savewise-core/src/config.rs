//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! the API base URL, demo mode, credential backend and last used phone.
//!
//! Configuration is stored at `~/.config/savewise/config.json`. The
//! `SAVEWISE_API_BASE_URL` and `SAVEWISE_DEMO_MODE` environment variables
//! override the saved values.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::{CredentialStore, FileStore, KeyValueStore, KeyringStore, MemoryStore};

/// Application name used for config/data directory paths
const APP_NAME: &str = "savewise";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Credential file name for the file backend
const CREDENTIALS_FILE: &str = "credentials.json";

/// Backend used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

pub const ENV_BASE_URL: &str = "SAVEWISE_API_BASE_URL";
pub const ENV_DEMO_MODE: &str = "SAVEWISE_DEMO_MODE";

/// Where session credentials persist between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialBackend {
    #[default]
    Keyring,
    File,
    Memory,
}

impl FromStr for CredentialBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyring" | "keychain" => Ok(CredentialBackend::Keyring),
            "file" => Ok(CredentialBackend::File),
            "memory" => Ok(CredentialBackend::Memory),
            other => Err(anyhow::anyhow!("Unknown credential backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub demo_mode: bool,
    #[serde(default)]
    pub credential_backend: CredentialBackend,
    pub last_phone: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            demo_mode: false,
            credential_backend: CredentialBackend::default(),
            last_phone: None,
        }
    }
}

/// Interpret common truthy spellings.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Config {
    /// Load the saved config, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Apply overrides from an environment-style lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(flag) = lookup(ENV_DEMO_MODE) {
            self.demo_mode = parse_flag(&flag);
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir =
            dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir =
            dirs::cache_dir().ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Build the credential store for the configured backend.
    pub fn credential_store(&self) -> Result<CredentialStore> {
        let backend: Arc<dyn KeyValueStore> = match self.credential_backend {
            CredentialBackend::Keyring => Arc::new(KeyringStore::new()),
            CredentialBackend::File => Arc::new(FileStore::new(
                self.data_dir()?.join(CREDENTIALS_FILE),
            )),
            CredentialBackend::Memory => Arc::new(MemoryStore::new()),
        };
        Ok(CredentialStore::new(backend))
    }
}
