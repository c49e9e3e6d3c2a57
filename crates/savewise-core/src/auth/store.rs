//! Key-value persistence backends for credentials.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use keyring::Entry;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Keychain service name for credential entries
const SERVICE_NAME: &str = "savewise";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Keychain error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("Credential file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt credential data: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Credential store lock poisoned")]
    Poisoned,

    #[error("Refusing to store an empty value for '{0}'")]
    EmptyValue(String),
}

/// Process-wide string slots addressed by key.
///
/// Each operation is individually atomic; there are no multi-key
/// transactions.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Mutex-guarded map, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let slots = self.slots.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut slots = self.slots.lock().map_err(|_| StoreError::Poisoned)?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut slots = self.slots.lock().map_err(|_| StoreError::Poisoned)?;
        slots.remove(key);
        Ok(())
    }
}

/// OS keychain, one entry per key under the `savewise` service.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, StoreError> {
        Ok(Entry::new(&self.service, key)?)
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entry(key)?.set_password(value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// JSON object on disk holding every slot.
///
/// Writes go to a uniquely named temp file in the same directory which is
/// then persisted over the target, so readers never see a half-written file.
/// The file is readable by its owner only (0600 on unix).
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_slots(&self, slots: &HashMap<String, String>) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(serde_json::to_string_pretty(slots)?.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), "Credential file written");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut slots = self.read_all()?;
        slots.insert(key.to_string(), value.to_string());
        self.write_slots(&slots)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut slots = self.read_all()?;
        if slots.remove(key).is_some() {
            self.write_slots(&slots)?;
        }
        Ok(())
    }
}
