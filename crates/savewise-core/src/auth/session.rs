use serde::{Deserialize, Serialize};

use crate::models::{KycStatus, User};

/// Access and refresh token pair issued by OTP verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCredentials {
    pub access_token: String,
    pub refresh_token: String,
}

impl SessionCredentials {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Cached user and KYC state, stored as one JSON blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProfile {
    pub user: Option<User>,
    #[serde(default)]
    pub kyc_status: KycStatus,
}

/// Notifications the API client broadcasts to the application shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Credentials were wiped after a failed refresh; the user must log in again.
    Terminated,
}
