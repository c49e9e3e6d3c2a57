//! Domain services over the API client.
//!
//! Each operation builds a request, runs it through the client's
//! refresh-aware pipeline and returns the normalized result. Operations are
//! grouped by area in the submodules, all as methods on `Services`.
//!
//! With demo mode on, operations that have canned data substitute it for a
//! failed call. Demo mode is off unless configured; it exists to run the
//! client without a backend.

mod auth;
pub mod demo;
mod kyc;
mod profile;
mod savings;
mod support;
mod wallet;

use tracing::warn;

use crate::api::{ApiClient, ApiResult};
use crate::auth::CredentialStore;

#[derive(Clone)]
pub struct Services {
    client: ApiClient,
    demo_mode: bool,
}

impl Services {
    pub fn new(client: ApiClient, demo_mode: bool) -> Self {
        Self { client, demo_mode }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn credentials(&self) -> &CredentialStore {
        self.client.credentials()
    }

    pub fn is_demo_mode(&self) -> bool {
        self.demo_mode
    }

    /// Replace a failure with demo data when demo mode is on.
    fn or_demo<T>(&self, operation: &str, result: ApiResult<T>, demo: impl FnOnce() -> T) -> ApiResult<T> {
        match result {
            Err(e) if self.demo_mode => {
                warn!(operation, error = %e, "Request failed, substituting demo data");
                Ok(demo())
            }
            other => other,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::client::tests::{client_with, ScriptedTransport};

    pub(crate) fn services(demo_mode: bool) -> (Services, Arc<ScriptedTransport>) {
        let transport = ScriptedTransport::new();
        let services = Services::new(client_with(&transport), demo_mode);
        (services, transport)
    }
}
