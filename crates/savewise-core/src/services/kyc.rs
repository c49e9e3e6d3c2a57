use serde::Serialize;
use tracing::warn;

use super::{demo, Services};
use crate::api::{ApiRequest, ApiResult};
use crate::endpoints;
use crate::models::{KycStatus, KycVerifyResponse};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PanRequest<'a> {
    pan_number: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AadhaarRequest<'a> {
    aadhaar_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    otp: Option<&'a str>,
}

/// Which KYC document a verification covers
#[derive(Debug, Clone, Copy)]
enum Document {
    Pan,
    Aadhaar,
}

impl Services {
    pub async fn verify_pan(&self, pan_number: &str, name: &str) -> ApiResult<KycVerifyResponse> {
        let request = ApiRequest::post(endpoints::kyc::VERIFY_PAN)
            .with_json(&PanRequest { pan_number, name })?;
        let result = self.client.request(request).await;
        let response = self.or_demo("verify_pan", result, || demo::kyc_verified("PAN"))?;
        self.record_verification(Document::Pan, &response)?;
        Ok(response)
    }

    pub async fn verify_aadhaar(
        &self,
        aadhaar_number: &str,
        otp: Option<&str>,
    ) -> ApiResult<KycVerifyResponse> {
        let request = ApiRequest::post(endpoints::kyc::VERIFY_AADHAAR)
            .with_json(&AadhaarRequest { aadhaar_number, otp })?;
        let result = self.client.request(request).await;
        let response = self.or_demo("verify_aadhaar", result, || demo::kyc_verified("Aadhaar"))?;
        self.record_verification(Document::Aadhaar, &response)?;
        Ok(response)
    }

    fn record_verification(&self, document: Document, response: &KycVerifyResponse) -> ApiResult<()> {
        if !response.verified {
            return Ok(());
        }
        let mut status = self.credentials().kyc_status();
        match document {
            Document::Pan => status.pan = true,
            Document::Aadhaar => status.aadhaar = true,
        }
        self.credentials().store_kyc_status(status)?;
        Ok(())
    }

    /// KYC status from the backend, cached locally on success.
    ///
    /// Falls back to the cached status when the backend cannot be reached,
    /// so this never fails.
    pub async fn kyc_status(&self) -> KycStatus {
        match self.client.get::<KycStatus>(endpoints::kyc::STATUS).await {
            Ok(status) => {
                if let Err(e) = self.credentials().store_kyc_status(status) {
                    warn!(error = %e, "Failed to cache KYC status");
                }
                status
            }
            Err(e) => {
                warn!(error = %e, "Using cached KYC status");
                self.local_kyc_status()
            }
        }
    }

    /// Cached KYC status without a network call.
    pub fn local_kyc_status(&self) -> KycStatus {
        self.credentials().kyc_status()
    }
}
