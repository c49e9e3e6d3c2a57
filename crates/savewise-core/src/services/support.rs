use super::{demo, Services};
use crate::api::{ApiRequest, ApiResult};
use crate::endpoints;
use crate::models::support::{FaqsResponse, TicketsResponse};
use crate::models::{CreateTicketRequest, Faq, SupportTicket, TicketStatus};

impl Services {
    /// Help center entries, optionally limited to one category.
    pub async fn faqs(&self, category: Option<&str>) -> ApiResult<Vec<Faq>> {
        let mut request = ApiRequest::get(endpoints::support::FAQ);
        if let Some(category) = category {
            request = request.with_query_param("category", category);
        }
        let result = self
            .client
            .request::<FaqsResponse>(request)
            .await
            .map(|r| r.faqs);
        self.or_demo("faqs", result, || {
            demo::faqs()
                .into_iter()
                .filter(|f| category.map_or(true, |c| f.category.eq_ignore_ascii_case(c)))
                .collect()
        })
    }

    pub async fn create_ticket(&self, ticket: &CreateTicketRequest) -> ApiResult<SupportTicket> {
        let result = self.client.post(endpoints::support::TICKET, ticket).await;
        self.or_demo("create_ticket", result, || {
            let now = demo::now();
            SupportTicket {
                id: demo::generated_id("TICK"),
                subject: ticket.subject.clone(),
                description: ticket.description.clone(),
                category: ticket.category.clone(),
                status: TicketStatus::Open,
                created_at: now.clone(),
                updated_at: now,
            }
        })
    }

    pub async fn tickets(&self) -> ApiResult<Vec<SupportTicket>> {
        let result = self
            .client
            .get::<TicketsResponse>(endpoints::support::TICKETS)
            .await
            .map(|r| r.tickets);
        self.or_demo("tickets", result, Vec::new)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use crate::models::{CreateTicketRequest, TicketPriority, TicketStatus};
    use crate::services::tests::services;

    #[tokio::test]
    async fn test_faqs_category_query() {
        let (services, transport) = services(false);
        transport.respond(
            StatusCode::OK,
            json!({ "faqs": [{ "id": "1", "question": "Q", "answer": "A", "category": "KYC" }] }),
        );

        let faqs = services.faqs(Some("KYC")).await.unwrap();
        assert_eq!(faqs.len(), 1);
        assert_eq!(
            transport.sent()[0].query(),
            &[("category".to_string(), "KYC".to_string())]
        );
    }

    #[tokio::test]
    async fn test_demo_faqs_filtered_by_category() {
        let (services, transport) = services(true);
        transport
            .respond(StatusCode::INTERNAL_SERVER_ERROR, json!({}))
            .respond(StatusCode::INTERNAL_SERVER_ERROR, json!({}));

        assert_eq!(services.faqs(Some("savings")).await.unwrap().len(), 2);
        assert_eq!(services.faqs(None).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_create_ticket_demo_fallback() {
        let (services, transport) = services(true);
        transport.respond(StatusCode::INTERNAL_SERVER_ERROR, json!({}));

        let ticket = services
            .create_ticket(&CreateTicketRequest {
                subject: "Refund pending".to_string(),
                description: "Withdrawal not received".to_string(),
                category: "Wallet".to_string(),
                priority: Some(TicketPriority::High),
            })
            .await
            .unwrap();
        assert!(ticket.id.starts_with("TICK"));
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(
            transport.sent()[0].body().and_then(|b| b.get("priority")),
            Some(&json!("high"))
        );
    }

    #[tokio::test]
    async fn test_tickets_demo_is_empty() {
        let (services, transport) = services(true);
        transport.respond(StatusCode::INTERNAL_SERVER_ERROR, json!({}));
        assert!(services.tickets().await.unwrap().is_empty());
    }
}
