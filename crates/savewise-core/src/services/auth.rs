use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use super::{demo, Services};
use crate::api::{ApiRequest, ApiResult};
use crate::auth::{SessionCredentials, SessionProfile};
use crate::endpoints;
use crate::models::{LoginResponse, OtpVerifyResponse, User};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyOtpRequest<'a> {
    phone: &'a str,
    otp: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<&'a str>,
}

impl Services {
    /// Ask the backend to send a one-time password to `phone`.
    pub async fn login_with_phone(&self, phone: &str) -> ApiResult<LoginResponse> {
        let result = self
            .client
            .post(endpoints::auth::LOGIN, &json!({ "phone": phone }))
            .await;
        self.or_demo("login", result, demo::login)
    }

    /// Verify the OTP and persist the issued session.
    pub async fn verify_otp(
        &self,
        phone: &str,
        otp: &str,
        session_id: Option<&str>,
    ) -> ApiResult<OtpVerifyResponse> {
        let request = ApiRequest::post(endpoints::auth::VERIFY_OTP).with_json(&VerifyOtpRequest {
            phone,
            otp,
            session_id,
        })?;
        let result = self.client.request(request).await;
        let response = self.or_demo("verify_otp", result, || demo::otp_verification(phone))?;

        self.start_session(&response)?;
        info!(user_id = %response.user.id, "Signed in");
        Ok(response)
    }

    fn start_session(&self, response: &OtpVerifyResponse) -> ApiResult<()> {
        let credentials = self.credentials();
        credentials.store_credentials(&SessionCredentials::new(
            response.token.clone(),
            response.refresh_token.clone(),
        ))?;
        credentials.store_profile(&SessionProfile {
            user: Some(response.user.clone()),
            kyc_status: response.kyc_status,
        })?;
        Ok(())
    }

    /// Tell the backend, then wipe local credentials whatever it answered.
    pub async fn logout(&self) -> ApiResult<()> {
        let request = ApiRequest::post(endpoints::auth::LOGOUT);
        if let Err(e) = self.client.request::<serde::de::IgnoredAny>(request).await {
            debug!(error = %e, "Logout request failed, clearing session anyway");
        }
        self.credentials().clear()?;
        info!("Signed out");
        Ok(())
    }

    /// User cached by the last OTP verification.
    pub fn current_user(&self) -> Option<User> {
        self.credentials().user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials().has_access_token()
    }
}
