use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct FaqsResponse {
    #[serde(default)]
    pub faqs: Vec<Faq>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Open => write!(f, "Open"),
            TicketStatus::InProgress => write!(f, "In Progress"),
            TicketStatus::Resolved => write!(f, "Resolved"),
            TicketStatus::Closed => write!(f, "Closed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct SupportTicket {
    pub id: String,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub status: TicketStatus,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl SupportTicket {
    pub fn is_active(&self) -> bool {
        matches!(self.status, TicketStatus::Open | TicketStatus::InProgress)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct TicketsResponse {
    #[serde(default)]
    pub tickets: Vec<SupportTicket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CreateTicketRequest {
    pub subject: String,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ticket_status() {
        let json = r#"{"id":"T1","subject":"Refund","status":"in-progress","createdAt":"2026-01-01T00:00:00Z","updatedAt":"2026-01-02T00:00:00Z"}"#;
        let ticket: SupportTicket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert!(ticket.is_active());
        assert_eq!(ticket.status.to_string(), "In Progress");
    }
}
