use serde::{Deserialize, Serialize};

/// A named savings target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    #[serde(rename = "targetAmount")]
    pub target_amount: f64,
    #[serde(rename = "currentAmount", default)]
    pub current_amount: f64,
    /// Calendar date, `YYYY-MM-DD`
    #[serde(rename = "targetDate")]
    pub target_date: String,
    #[serde(default)]
    pub emoji: String,
}

impl SavingsGoal {
    /// Amount still needed, never negative.
    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

/// Goal fields supplied by the user; the backend assigns id and balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct NewSavingsGoal {
    pub name: String,
    pub target_amount: f64,
    pub target_date: String,
    pub emoji: String,
}

impl NewSavingsGoal {
    /// Goal as it exists right after creation.
    pub fn into_goal(self, id: impl Into<String>) -> SavingsGoal {
        SavingsGoal {
            id: id.into(),
            name: self.name,
            target_amount: self.target_amount,
            current_amount: 0.0,
            target_date: self.target_date,
            emoji: self.emoji,
        }
    }
}

/// Partial update of a goal; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct GoalsResponse {
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum SaveFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl std::fmt::Display for SaveFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveFrequency::Daily => write!(f, "Daily"),
            SaveFrequency::Weekly => write!(f, "Weekly"),
            SaveFrequency::Monthly => write!(f, "Monthly"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct AutoSaveConfig {
    pub enabled: bool,
    pub frequency: SaveFrequency,
    pub amount: f64,
    /// 0 = Sunday, for weekly saving
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u8>,
    /// 1-31, for monthly saving
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u8>,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            frequency: SaveFrequency::Daily,
            amount: 0.0,
            day_of_week: None,
            day_of_month: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct LockSavingsRequest {
    pub amount: f64,
    /// Lock duration as understood by the backend, e.g. `"6"` months
    pub lock_period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct LockReceipt {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "lockId", default, skip_serializing_if = "Option::is_none")]
    pub lock_id: Option<String>,
}
