//! API client for the savewise backend.
//!
//! `ApiClient` composes three stages explicitly:
//! 1. [`ApiClient::dispatch`] attaches the stored access token and sends
//! 2. [`ApiClient::execute_with_refresh`] runs at most one refresh-and-retry
//!    cycle when the server answers 401
//! 3. [`normalize`] turns the outcome into an `ApiResult`
//!
//! When a refresh is impossible or fails, the credential store is wiped and
//! [`SessionEvent::Terminated`] is broadcast to subscribers.

use std::sync::Arc;

use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{normalize, ApiRequest, ApiResult, HttpTransport, RawOutcome, Transport};
use crate::auth::{CredentialStore, SessionEvent};
use crate::endpoints;

/// Buffered session events per subscriber.
/// Termination is rare; a handful of slots covers bursts of concurrent 401s.
const SESSION_EVENT_CAPACITY: usize = 16;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    token: String,
}

/// Authenticated client for the savewise REST API.
/// Clone is cheap - transport, credential store and event channel are shared.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    credentials: CredentialStore,
    events: broadcast::Sender<SessionEvent>,
}

impl ApiClient {
    /// Create a client talking HTTP to `base_url`
    pub fn new(base_url: &str, credentials: CredentialStore) -> Result<Self> {
        let transport = HttpTransport::new(base_url)?;
        Ok(Self::with_transport(Arc::new(transport), credentials))
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn Transport>, credentials: CredentialStore) -> Self {
        let (events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);
        Self {
            transport,
            credentials,
            events,
        }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Receive session events (currently only termination).
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Send one attempt, carrying the stored access token when there is one.
    ///
    /// A request that already carries a bearer token (a retry) is sent as is.
    pub async fn dispatch(&self, request: &ApiRequest) -> RawOutcome {
        debug!(
            method = %request.method(),
            path = request.path(),
            retried = request.is_retried(),
            "Dispatching request"
        );

        if request.bearer().is_some() {
            return self.transport.send(request).await;
        }

        match self.credentials.access_token() {
            Some(token) => {
                let authorized = request.clone().with_bearer(token);
                self.transport.send(&authorized).await
            }
            None => self.transport.send(request).await,
        }
    }

    /// Dispatch, and on a first 401 try exactly one refresh-and-retry.
    pub async fn execute_with_refresh(&self, request: ApiRequest) -> RawOutcome {
        let outcome = self.dispatch(&request).await;

        let unauthorized = matches!(&outcome, Ok(response) if response.is_unauthorized());
        if !unauthorized || request.is_retried() {
            return outcome;
        }

        let Some(refresh_token) = self.credentials.refresh_token() else {
            warn!(path = request.path(), "Unauthorized with no refresh token stored");
            self.terminate_session();
            return outcome;
        };

        match self.refresh_access_token(&refresh_token).await {
            Some(token) => {
                if let Err(e) = self.credentials.set_access_token(&token) {
                    warn!(error = %e, "Failed to persist refreshed access token");
                }
                let retry = request.into_retry(token);
                self.dispatch(&retry).await
            }
            None => {
                self.terminate_session();
                outcome
            }
        }
    }

    /// Full pipeline: dispatch, refresh on 401, normalize.
    pub async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        normalize(self.execute_with_refresh(request).await)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(ApiRequest::get(path)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.request(ApiRequest::post(path).with_json(body)?).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.request(ApiRequest::put(path).with_json(body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(ApiRequest::delete(path)).await
    }

    /// Exchange the refresh token for a new access token.
    /// The refresh call itself is sent unauthenticated.
    async fn refresh_access_token(&self, refresh_token: &str) -> Option<String> {
        let request = ApiRequest::post(endpoints::auth::REFRESH_TOKEN)
            .with_json(&RefreshRequest { refresh_token })
            .ok()?;

        match normalize::<RefreshResponse>(self.transport.send(&request).await) {
            Ok(response) if !response.token.is_empty() => {
                info!("Access token refreshed");
                Some(response.token)
            }
            Ok(_) => {
                warn!("Refresh response carried an empty token");
                None
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                None
            }
        }
    }

    /// Wipe credentials and tell subscribers the session is over.
    fn terminate_session(&self) {
        warn!("Session terminated, credentials cleared");
        if let Err(e) = self.credentials.clear() {
            warn!(error = %e, "Credential store not fully cleared");
        }
        // No subscribers is fine
        let _ = self.events.send(SessionEvent::Terminated);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::{Method, StatusCode};
    use serde_json::{json, Value};

    use super::*;
    use crate::api::{ApiError, RawResponse, TransportError};
    use crate::auth::{SessionCredentials, SessionProfile};
    use crate::models::KycStatus;

    /// Transport replaying scripted outcomes and recording every attempt.
    #[derive(Default)]
    pub(crate) struct ScriptedTransport {
        outcomes: Mutex<VecDeque<RawOutcome>>,
        sent: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub(crate) fn respond(&self, status: StatusCode, body: Value) -> &Self {
            self.outcomes
                .lock()
                .unwrap()
                .push_back(Ok(RawResponse::new(status, body.to_string())));
            self
        }

        pub(crate) fn fail(&self, error: TransportError) -> &Self {
            self.outcomes.lock().unwrap().push_back(Err(error));
            self
        }

        pub(crate) fn sent(&self) -> Vec<ApiRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: &ApiRequest) -> RawOutcome {
            self.sent.lock().unwrap().push(request.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Other("no scripted response".to_string())))
        }
    }

    pub(crate) fn client_with(transport: &Arc<ScriptedTransport>) -> ApiClient {
        ApiClient::with_transport(transport.clone(), CredentialStore::in_memory())
    }

    fn signed_in(client: &ApiClient, access: &str) {
        client
            .credentials()
            .store_credentials(&SessionCredentials::new(access, "R1"))
            .unwrap();
        client
            .credentials()
            .store_profile(&SessionProfile {
                user: None,
                kyc_status: KycStatus {
                    pan: true,
                    aadhaar: false,
                },
            })
            .unwrap();
    }

    fn count_terminations(rx: &mut broadcast::Receiver<SessionEvent>) -> usize {
        let mut count = 0;
        while let Ok(SessionEvent::Terminated) = rx.try_recv() {
            count += 1;
        }
        count
    }

    #[tokio::test]
    async fn test_no_token_omits_authorization() {
        let transport = ScriptedTransport::new();
        transport.respond(StatusCode::OK, json!({ "success": true }));
        let client = client_with(&transport);

        let result: Value = client
            .post("/auth/login", &json!({ "phone": "9876543210" }))
            .await
            .expect("login should succeed");
        assert_eq!(result, json!({ "success": true }));

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].authorization(), None);
        assert_eq!(sent[0].method(), &Method::POST);
    }

    #[tokio::test]
    async fn test_token_attached_when_present() {
        let transport = ScriptedTransport::new();
        transport.respond(StatusCode::OK, json!({ "balance": 100 }));
        let client = client_with(&transport);
        signed_in(&client, "T1");

        let _: Value = client.get("/wallet/balance").await.unwrap();
        assert_eq!(
            transport.sent()[0].authorization().as_deref(),
            Some("Bearer T1")
        );
    }

    #[tokio::test]
    async fn test_stale_token_refreshed_and_retried() {
        let transport = ScriptedTransport::new();
        transport
            .respond(StatusCode::UNAUTHORIZED, json!({ "message": "jwt expired" }))
            .respond(StatusCode::OK, json!({ "token": "T2" }))
            .respond(StatusCode::OK, json!({ "balance": 25000 }));
        let client = client_with(&transport);
        signed_in(&client, "T1");
        let mut rx = client.subscribe();

        let result: Value = client
            .get("/wallet/balance")
            .await
            .expect("retry should succeed");
        assert_eq!(result, json!({ "balance": 25000 }));

        let sent = transport.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].authorization().as_deref(), Some("Bearer T1"));
        assert!(!sent[0].is_retried());

        // Refresh call goes out unauthenticated with the stored refresh token
        assert_eq!(sent[1].path(), endpoints::auth::REFRESH_TOKEN);
        assert_eq!(sent[1].authorization(), None);
        assert_eq!(sent[1].body(), Some(&json!({ "refreshToken": "R1" })));

        assert_eq!(sent[2].path(), "/wallet/balance");
        assert_eq!(sent[2].method(), &Method::GET);
        assert_eq!(sent[2].authorization().as_deref(), Some("Bearer T2"));
        assert!(sent[2].is_retried());

        assert_eq!(client.credentials().access_token().as_deref(), Some("T2"));
        assert_eq!(client.credentials().refresh_token().as_deref(), Some("R1"));
        assert_eq!(count_terminations(&mut rx), 0);
    }

    #[tokio::test]
    async fn test_missing_refresh_token_terminates_session() {
        let transport = ScriptedTransport::new();
        transport.respond(StatusCode::UNAUTHORIZED, json!({}));
        let client = client_with(&transport);
        client.credentials().set_access_token("T1").unwrap();
        let mut rx = client.subscribe();

        let err = client.get::<Value>("/wallet/balance").await.unwrap_err();
        assert!(err.is_unauthorized());

        assert_eq!(transport.sent().len(), 1);
        assert!(client.credentials().is_empty());
        assert_eq!(count_terminations(&mut rx), 1);
    }

    #[tokio::test]
    async fn test_second_unauthorized_not_refreshed_again() {
        let transport = ScriptedTransport::new();
        transport
            .respond(StatusCode::UNAUTHORIZED, json!({}))
            .respond(StatusCode::OK, json!({ "token": "T2" }))
            .respond(StatusCode::UNAUTHORIZED, json!({ "message": "Account suspended" }));
        let client = client_with(&transport);
        signed_in(&client, "T1");
        let mut rx = client.subscribe();

        let err = client.get::<Value>("/profile").await.unwrap_err();
        assert_eq!(err, ApiError::Unauthorized("Account suspended".to_string()));

        let sent = transport.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(
            sent.iter()
                .filter(|r| r.path() == endpoints::auth::REFRESH_TOKEN)
                .count(),
            1
        );
        // The retried call's failure does not wipe the refreshed session
        assert_eq!(client.credentials().access_token().as_deref(), Some("T2"));
        assert_eq!(count_terminations(&mut rx), 0);
    }

    #[tokio::test]
    async fn test_expired_refresh_token_clears_store() {
        let transport = ScriptedTransport::new();
        transport
            .respond(StatusCode::UNAUTHORIZED, json!({}))
            .respond(StatusCode::UNAUTHORIZED, json!({ "message": "refresh expired" }));
        let client = client_with(&transport);
        signed_in(&client, "T1");
        let mut rx = client.subscribe();

        let result = client
            .post::<Value, _>("/savings/lock", &json!({ "amount": 1000 }))
            .await;
        assert!(result.is_err());

        assert_eq!(transport.sent().len(), 2);
        assert!(client.credentials().is_empty());
        assert_eq!(count_terminations(&mut rx), 1);
    }

    #[tokio::test]
    async fn test_refresh_transport_failure_terminates_session() {
        let transport = ScriptedTransport::new();
        transport
            .respond(StatusCode::UNAUTHORIZED, json!({}))
            .fail(TransportError::Timeout(30));
        let client = client_with(&transport);
        signed_in(&client, "T1");
        let mut rx = client.subscribe();

        let err = client.get::<Value>("/kyc/status").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(client.credentials().is_empty());
        assert_eq!(count_terminations(&mut rx), 1);
    }

    #[tokio::test]
    async fn test_refresh_without_token_field_terminates_session() {
        let transport = ScriptedTransport::new();
        transport
            .respond(StatusCode::UNAUTHORIZED, json!({}))
            .respond(StatusCode::OK, json!({ "accessToken": "T2" }));
        let client = client_with(&transport);
        signed_in(&client, "T1");
        let mut rx = client.subscribe();

        assert!(client.get::<Value>("/profile").await.is_err());
        assert_eq!(transport.sent().len(), 2);
        assert!(client.credentials().is_empty());
        assert_eq!(count_terminations(&mut rx), 1);
    }

    #[tokio::test]
    async fn test_application_errors_pass_through() {
        let transport = ScriptedTransport::new();
        transport
            .respond(StatusCode::FORBIDDEN, json!({ "message": "KYC required" }))
            .respond(StatusCode::INTERNAL_SERVER_ERROR, json!({}));
        let client = client_with(&transport);
        signed_in(&client, "T1");

        let err = client.get::<Value>("/wallet/withdraw").await.unwrap_err();
        assert_eq!(err, ApiError::AccessDenied("KYC required".to_string()));

        let err = client.get::<Value>("/wallet/balance").await.unwrap_err();
        assert_eq!(err.status(), Some(500));

        // Neither failure triggered a refresh or touched credentials
        assert_eq!(transport.sent().len(), 2);
        assert_eq!(client.credentials().access_token().as_deref(), Some("T1"));
    }

    #[tokio::test]
    async fn test_transport_error_not_retried() {
        let transport = ScriptedTransport::new();
        transport.fail(TransportError::Connect("connection refused".to_string()));
        let client = client_with(&transport);
        signed_in(&client, "T1");

        let err = client.get::<Value>("/wallet/balance").await.unwrap_err();
        assert!(err.is_network());
        assert_eq!(transport.sent().len(), 1);
        assert!(client.credentials().has_access_token());
    }

    #[tokio::test]
    async fn test_already_retried_request_returned_as_is() {
        let transport = ScriptedTransport::new();
        transport.respond(StatusCode::UNAUTHORIZED, json!({}));
        let client = client_with(&transport);
        signed_in(&client, "T1");

        let request = ApiRequest::get("/profile").into_retry("T9");
        let outcome = client.execute_with_refresh(request).await;
        assert!(matches!(outcome, Ok(ref r) if r.is_unauthorized()));
        assert_eq!(transport.sent().len(), 1);
        assert!(client.credentials().has_access_token());
    }
}
