//! REST API client module for the savewise backend.
//!
//! Requests flow through three explicit stages:
//! - dispatch: attach the stored access token and send through a `Transport`
//! - refresh: on a 401, run at most one refresh-and-retry cycle
//! - normalize: turn any outcome into `Result<T, ApiError>`
//!
//! The backend uses JWT bearer tokens obtained from OTP verification and
//! renewed through the refresh-token endpoint.

pub mod client;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;

pub use client::ApiClient;
pub use error::{ApiError, TransportError};
pub use request::ApiRequest;
pub use response::{normalize, RawOutcome, RawResponse};
pub use transport::{HttpTransport, Transport};

/// Uniform result delivered to every caller of the API client.
pub type ApiResult<T> = Result<T, ApiError>;
