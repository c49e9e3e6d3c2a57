use std::sync::Arc;

use tracing::warn;

use super::session::{SessionCredentials, SessionProfile};
use super::store::{KeyValueStore, MemoryStore, StoreError};
use crate::models::{KycStatus, User};

/// Slot holding the bearer access token
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Slot holding the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Slot holding the cached user and KYC JSON blob
pub const USER_DATA_KEY: &str = "user_data";

/// Typed view over the three credential slots.
///
/// Shared by the API client and the services. Clone is cheap: every clone
/// talks to the same backend.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Store backed by process memory only
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Read a slot, treating backend failures as an empty slot.
    fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(slot = key, error = %e, "Failed to read credential slot");
                None
            }
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.read(AUTH_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY)
    }

    /// Both tokens, if both are present.
    pub fn credentials(&self) -> Option<SessionCredentials> {
        Some(SessionCredentials {
            access_token: self.access_token()?,
            refresh_token: self.refresh_token()?,
        })
    }

    /// Write a token slot. An empty slot reads as absent, so empty tokens
    /// are rejected rather than silently dropped.
    fn write_token(&self, key: &str, token: &str) -> Result<(), StoreError> {
        if token.is_empty() {
            return Err(StoreError::EmptyValue(key.to_string()));
        }
        self.backend.set(key, token)
    }

    /// Store both tokens. Neither is written unless both are non-empty.
    pub fn store_credentials(&self, credentials: &SessionCredentials) -> Result<(), StoreError> {
        if credentials.refresh_token.is_empty() {
            return Err(StoreError::EmptyValue(REFRESH_TOKEN_KEY.to_string()));
        }
        self.write_token(AUTH_TOKEN_KEY, &credentials.access_token)?;
        self.write_token(REFRESH_TOKEN_KEY, &credentials.refresh_token)
    }

    /// Overwrite only the access token, as a successful refresh does.
    pub fn set_access_token(&self, token: &str) -> Result<(), StoreError> {
        self.write_token(AUTH_TOKEN_KEY, token)
    }

    pub fn profile(&self) -> Option<SessionProfile> {
        let raw = self.read(USER_DATA_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable cached profile");
                None
            }
        }
    }

    pub fn store_profile(&self, profile: &SessionProfile) -> Result<(), StoreError> {
        let raw = serde_json::to_string(profile)?;
        self.backend.set(USER_DATA_KEY, &raw)
    }

    pub fn user(&self) -> Option<User> {
        self.profile().and_then(|p| p.user)
    }

    /// Cached KYC status, all-false when nothing is cached.
    pub fn kyc_status(&self) -> KycStatus {
        self.profile().map(|p| p.kyc_status).unwrap_or_default()
    }

    /// Replace the cached KYC status, keeping the cached user.
    pub fn store_kyc_status(&self, status: KycStatus) -> Result<(), StoreError> {
        let mut profile = self.profile().unwrap_or_default();
        profile.kyc_status = status;
        self.store_profile(&profile)
    }

    /// Remove every slot. All removals are attempted; the first failure is
    /// reported.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut first_error = None;
        for key in [AUTH_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_DATA_KEY] {
            if let Err(e) = self.backend.remove(key) {
                warn!(slot = key, error = %e, "Failed to clear credential slot");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token().is_some()
    }

    /// True when no slot holds a value.
    pub fn is_empty(&self) -> bool {
        [AUTH_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_DATA_KEY]
            .iter()
            .all(|key| self.read(key).is_none())
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Token values stay out of debug output
        f.debug_struct("CredentialStore")
            .field("has_access_token", &self.has_access_token())
            .finish()
    }
}
