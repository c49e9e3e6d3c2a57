use serde::{Deserialize, Serialize};

/// The signed-in user as returned by OTP verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct User {
    pub id: String,
    pub phone: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl User {
    /// Name for greetings, falling back to the phone number.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.phone,
        }
    }
}

/// Two-step identity verification state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct KycStatus {
    #[serde(default)]
    pub pan: bool,
    #[serde(default)]
    pub aadhaar: bool,
}

impl KycStatus {
    /// Both PAN and Aadhaar verified.
    pub fn is_complete(&self) -> bool {
        self.pan && self.aadhaar
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "sessionId", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct OtpVerifyResponse {
    pub success: bool,
    pub token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    pub user: User,
    #[serde(rename = "kycStatus", default)]
    pub kyc_status: KycStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct KycVerifyResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_otp_verify_response() {
        let json = r#"{"success":true,"token":"jwt","refreshToken":"rt","user":{"id":"u1","phone":"9876543210","name":"Asha"},"kycStatus":{"pan":true,"aadhaar":false}}"#;
        let resp: OtpVerifyResponse =
            serde_json::from_str(json).expect("Failed to parse OTP verify test JSON");
        assert_eq!(resp.refresh_token, "rt");
        assert_eq!(resp.user.email, None);
        assert!(resp.kyc_status.pan);
        assert!(!resp.kyc_status.is_complete());
    }

    #[test]
    fn test_display_name_falls_back_to_phone() {
        let mut user = User {
            id: "u1".to_string(),
            phone: "9876543210".to_string(),
            name: Some("  ".to_string()),
            email: None,
        };
        assert_eq!(user.display_name(), "9876543210");
        user.name = Some("Asha".to_string());
        assert_eq!(user.display_name(), "Asha");
    }
}
