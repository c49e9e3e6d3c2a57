use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default currency when the backend omits one
const DEFAULT_CURRENCY: &str = "INR";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct WalletBalance {
    pub balance: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(rename = "lastUpdated", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl WalletBalance {
    pub fn new(balance: f64) -> Self {
        Self {
            balance,
            currency: default_currency(),
            last_updated: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    Debit,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Credit => write!(f, "Credit"),
            TransactionType::Debit => write!(f, "Debit"),
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "credit" => Ok(TransactionType::Credit),
            "debit" => Ok(TransactionType::Debit),
            other => Err(format!("unknown transaction type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Completed => write!(f, "Completed"),
            TransactionStatus::Pending => write!(f, "Pending"),
            TransactionStatus::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// ISO-8601 timestamp
    pub date: String,
    pub status: TransactionStatus,
    /// Wallet balance after this transaction, when the backend reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
}

impl Transaction {
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }

    /// Amount with sign: credits positive, debits negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Credit => self.amount,
            TransactionType::Debit => -self.amount,
        }
    }
}

/// Query parameters for the transaction history endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl TransactionFilter {
    /// Apply the filter locally, for lists that did not come from the
    /// backend's filtered endpoint.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if transaction.kind != kind {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if !transaction.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct TransactionsResponse {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CardDetails {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct AddMoneyRequest {
    pub amount: f64,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_details: Option<CardDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    pub amount: f64,
    pub bank_account_id: String,
}

/// Acknowledgement of a wallet operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct OperationReceipt {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "transactionId", default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}
