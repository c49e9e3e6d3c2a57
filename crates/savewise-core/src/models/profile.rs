//! Profile and bank account models.

use serde::{Deserialize, Serialize};

use super::KycStatus;

/// Postal address on the user's profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl Address {
    /// Format the address as a single line.
    pub fn formatted(&self) -> String {
        [&self.street, &self.city, &self.state, &self.pincode]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: String,
    #[serde(rename = "dateOfBirth", default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(rename = "kycStatus", default)]
    pub kyc_status: KycStatus,
}

/// Partial profile update; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub account_holder_name: String,
    pub bank_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

impl BankAccount {
    /// Account number with all but the last four digits hidden.
    pub fn masked_number(&self) -> String {
        let digits: Vec<char> = self.account_number.chars().collect();
        if digits.len() <= 4 {
            return self.account_number.clone();
        }
        let tail: String = digits[digits.len() - 4..].iter().collect();
        format!("****{}", tail)
    }
}

/// Bank account details before the backend assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct NewBankAccount {
    pub account_number: String,
    pub ifsc_code: String,
    pub account_holder_name: String,
    pub bank_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    pub is_primary: bool,
}

impl NewBankAccount {
    pub fn into_account(self, id: impl Into<String>) -> BankAccount {
        BankAccount {
            id: id.into(),
            account_number: self.account_number,
            ifsc_code: self.ifsc_code,
            account_holder_name: self.account_holder_name,
            bank_name: self.bank_name,
            branch: self.branch,
            is_primary: self.is_primary,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct BankAccountsResponse {
    #[serde(default)]
    pub accounts: Vec<BankAccount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_number() {
        let account = NewBankAccount {
            account_number: "50100012341234".to_string(),
            ifsc_code: "HDFC0001234".to_string(),
            account_holder_name: "Asha Rao".to_string(),
            bank_name: "HDFC Bank".to_string(),
            branch: None,
            is_primary: true,
        }
        .into_account("b1");
        assert_eq!(account.masked_number(), "****1234");

        let already_masked = BankAccount {
            account_number: "1234".to_string(),
            ..account
        };
        assert_eq!(already_masked.masked_number(), "1234");
    }

    #[test]
    fn test_address_formatted_skips_blanks() {
        let address = Address {
            street: "12 MG Road".to_string(),
            city: "Pune".to_string(),
            state: String::new(),
            pincode: "411001".to_string(),
        };
        assert_eq!(address.formatted(), "12 MG Road, Pune, 411001");
    }

    #[test]
    fn test_parse_profile_without_optional_fields() {
        let json = r#"{"id":"u1","name":"Asha","phone":"+91 9876543210"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.email, "");
        assert_eq!(profile.address, None);
        assert!(!profile.kyc_status.pan);
    }
}
