//! Authentication state for the API client.
//!
//! This module provides:
//! - `CredentialStore`: typed access to the access token, refresh token and
//!   cached user/KYC profile
//! - `KeyValueStore` backends: in-memory, OS keychain via keyring, JSON file
//! - `SessionEvent`: the session-termination signal broadcast by the client
//!
//! Credentials are created by OTP verification, replaced by token refresh
//! and wiped on logout or refresh failure.

pub mod credentials;
pub mod session;
pub mod store;

pub use credentials::CredentialStore;
pub use session::{SessionCredentials, SessionEvent, SessionProfile};
pub use store::{FileStore, KeyValueStore, KeyringStore, MemoryStore, StoreError};
