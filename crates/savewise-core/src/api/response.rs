//! Raw dispatch outcomes and their normalization into `ApiResult`.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ApiError, ApiResult, TransportError};

/// An HTTP response as received, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }
}

/// What the dispatcher observed: a response with some status, or no
/// response at all.
pub type RawOutcome = Result<RawResponse, TransportError>;

/// Convert a dispatch outcome into the uniform result type.
///
/// An empty 2xx body decodes as JSON `null`, so `()` and `Option<T>` targets
/// accept bodiless responses.
pub fn normalize<T: DeserializeOwned>(outcome: RawOutcome) -> ApiResult<T> {
    let response = outcome?;

    if !response.status.is_success() {
        debug!(
            status = response.status.as_u16(),
            body = %ApiError::truncate_body(&response.body),
            "Request failed"
        );
        return Err(ApiError::from_status(response.status, &response.body));
    }

    let body = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };

    serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}
