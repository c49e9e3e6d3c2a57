//! Core library for savewise.
//!
//! Provides the authenticated API client (bearer credentials with a single
//! refresh-and-retry cycle on 401), the credential store, configuration, the
//! wallet/savings domain models and the service wrappers built on top of
//! the client.

pub mod api;
pub mod auth;
pub mod config;
pub mod endpoints;
pub mod models;
pub mod services;

pub use api::{ApiClient, ApiError, ApiRequest, ApiResult};
pub use auth::{CredentialStore, SessionEvent};
pub use config::Config;
pub use services::Services;
