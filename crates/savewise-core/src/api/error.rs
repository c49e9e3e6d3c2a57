use reqwest::StatusCode;
use thiserror::Error;

use crate::auth::StoreError;

/// Failure of a request that never produced an HTTP response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("timeout of {0}s exceeded")]
    Timeout(u64),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),
}

/// Error half of every `ApiResult`.
///
/// The `Display` output is the caller-facing message: the server's `message`
/// field when it sent one, otherwise a generic status or network description.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    AccessDenied(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("{message}")]
    ServerError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] TransportError),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Credential storage failed: {0}")]
    Storage(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

/// Maximum length for error response bodies in log output
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        match body.char_indices().nth(MAX_ERROR_BODY_LENGTH) {
            None => body.to_string(),
            Some((cut, _)) => format!(
                "{}... (truncated, {} total bytes)",
                &body[..cut],
                body.len()
            ),
        }
    }

    /// Pull the conventional `message` field out of an error body.
    fn server_message(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let code = status.as_u16();
        let message = Self::server_message(body)
            .unwrap_or_else(|| format!("Request failed with status code {}", code));
        match code {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::AccessDenied(message),
            404 => ApiError::NotFound(message),
            500..=599 => ApiError::ServerError { status: code, message },
            _ => ApiError::Rejected { status: code, message },
        }
    }

    /// HTTP status behind this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::AccessDenied(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Rejected { status, .. } | ApiError::ServerError { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// Caller-facing message, same as `Display`.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_uses_server_message() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Insufficient balance"}"#,
        );
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 400,
                message: "Insufficient balance".to_string()
            }
        );
        assert_eq!(err.message(), "Insufficient balance");
    }

    #[test]
    fn test_from_status_generic_message() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(err.to_string(), "Request failed with status code 500");
        assert_eq!(err.status(), Some(500));

        // Blank message falls back too
        let err = ApiError::from_status(StatusCode::NOT_FOUND, r#"{"message":"  "}"#);
        assert_eq!(err.to_string(), "Request failed with status code 404");
    }

    #[test]
    fn test_from_status_classification() {
        assert!(ApiError::from_status(StatusCode::UNAUTHORIZED, "").is_unauthorized());
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, ""),
            ApiError::AccessDenied(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            ApiError::Rejected { status: 429, .. }
        ));
    }

    #[test]
    fn test_network_error_message() {
        let err = ApiError::from(TransportError::Timeout(30));
        assert!(err.is_network());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Network error: timeout of 30s exceeded");
    }

    #[test]
    fn test_truncate_body() {
        let short = "short body";
        assert_eq!(ApiError::truncate_body(short), short);

        let long = "é".repeat(600);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.starts_with(&"é".repeat(500)));
        assert!(truncated.ends_with("(truncated, 1200 total bytes)"));
    }
}
