//! Request descriptors handed to the dispatcher.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::ApiError;

/// One attempt of a logical API request.
///
/// A value describes a single attempt: retrying produces a new value through
/// [`ApiRequest::into_retry`], which is the only way `retried` becomes true.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    bearer: Option<String>,
    retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to encode body: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Add query parameters from any struct or map that serializes to a flat
    /// JSON object. `null` fields are skipped.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self, ApiError> {
        let value = serde_json::to_value(params)
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to encode query: {}", e)))?;
        match value {
            Value::Null => {}
            Value::Object(map) => {
                for (key, value) in map {
                    match value {
                        Value::Null => {}
                        Value::String(s) => self.query.push((key, s)),
                        Value::Bool(_) | Value::Number(_) => {
                            self.query.push((key, value.to_string()))
                        }
                        _ => {
                            return Err(ApiError::InvalidRequest(format!(
                                "Query parameter '{}' is not a scalar",
                                key
                            )))
                        }
                    }
                }
            }
            _ => {
                return Err(ApiError::InvalidRequest(
                    "Query parameters must be an object".to_string(),
                ))
            }
        }
        Ok(self)
    }

    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a bearer credential to this attempt.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// The follow-up attempt after a successful refresh.
    pub fn into_retry(self, token: impl Into<String>) -> Self {
        Self {
            retried: true,
            ..self.with_bearer(token)
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn bearer(&self) -> Option<&str> {
        self.bearer.as_deref()
    }

    /// Value of the `Authorization` header this attempt will carry.
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|t| format!("Bearer {}", t))
    }

    pub fn is_retried(&self) -> bool {
        self.retried
    }
}
