use super::{demo, Services};
use crate::api::{ApiRequest, ApiResult};
use crate::endpoints;
use crate::models::wallet::TransactionsResponse;
use crate::models::{
    AddMoneyRequest, OperationReceipt, Transaction, TransactionFilter, WalletBalance,
    WithdrawRequest,
};

impl Services {
    pub async fn balance(&self) -> ApiResult<WalletBalance> {
        let result = self.client.get(endpoints::wallet::BALANCE).await;
        self.or_demo("balance", result, demo::balance)
    }

    pub async fn add_money(&self, request: &AddMoneyRequest) -> ApiResult<OperationReceipt> {
        let result = self.client.post(endpoints::wallet::ADD_MONEY, request).await;
        self.or_demo("add_money", result, || demo::receipt("Money added successfully"))
    }

    pub async fn withdraw(&self, request: &WithdrawRequest) -> ApiResult<OperationReceipt> {
        let result = self.client.post(endpoints::wallet::WITHDRAW, request).await;
        self.or_demo("withdraw", result, || {
            demo::receipt("Withdrawal initiated successfully")
        })
    }

    /// Transaction history, filtered server-side.
    pub async fn transactions(&self, filter: &TransactionFilter) -> ApiResult<Vec<Transaction>> {
        let request = ApiRequest::get(endpoints::wallet::TRANSACTIONS).with_query(filter)?;
        let result = self
            .client
            .request::<TransactionsResponse>(request)
            .await
            .map(|r| r.transactions);
        self.or_demo("transactions", result, || {
            demo::transactions()
                .into_iter()
                .filter(|t| filter.matches(t))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use reqwest::{Method, StatusCode};
    use serde_json::json;

    use crate::models::{TransactionFilter, TransactionType, WithdrawRequest};
    use crate::services::tests::services;

    #[tokio::test]
    async fn test_balance() {
        let (services, transport) = services(false);
        transport.respond(
            StatusCode::OK,
            json!({ "balance": 1250.5, "currency": "INR", "lastUpdated": "2026-01-01T00:00:00Z" }),
        );

        let balance = services.balance().await.unwrap();
        assert_eq!(balance.balance, 1250.5);
        assert_eq!(transport.sent()[0].method(), &Method::GET);
        assert_eq!(transport.sent()[0].path(), "/wallet/balance");
    }

    #[tokio::test]
    async fn test_balance_failure_surfaces_without_demo() {
        let (services, transport) = services(false);
        transport.respond(StatusCode::SERVICE_UNAVAILABLE, json!({ "message": "Maintenance" }));

        let err = services.balance().await.unwrap_err();
        assert_eq!(err.to_string(), "Maintenance");
    }

    #[tokio::test]
    async fn test_balance_demo_fallback() {
        let (services, transport) = services(true);
        transport.respond(StatusCode::SERVICE_UNAVAILABLE, json!({}));

        let balance = services.balance().await.unwrap();
        assert_eq!(balance.balance, 25000.0);
    }

    #[tokio::test]
    async fn test_transactions_sends_filter_as_query() {
        let (services, transport) = services(false);
        transport.respond(
            StatusCode::OK,
            json!({ "transactions": [{
                "id": "9", "type": "debit", "amount": 300, "description": "Cab",
                "category": "Travel", "date": "2026-01-10T08:00:00Z", "status": "pending"
            }] }),
        );

        let filter = TransactionFilter {
            kind: Some(TransactionType::Debit),
            limit: Some(10),
            ..Default::default()
        };
        let txns = services.transactions(&filter).await.unwrap();
        assert_eq!(txns.len(), 1);

        let query = transport.sent()[0].query().to_vec();
        assert!(query.contains(&("type".to_string(), "debit".to_string())));
        assert!(query.contains(&("limit".to_string(), "10".to_string())));
        assert_eq!(query.len(), 2);
    }

    #[tokio::test]
    async fn test_transactions_missing_list_is_empty() {
        let (services, transport) = services(false);
        transport.respond(StatusCode::OK, json!({}));
        let txns = services.transactions(&TransactionFilter::default()).await.unwrap();
        assert!(txns.is_empty());
    }

    #[tokio::test]
    async fn test_demo_transactions_respect_filter() {
        let (services, transport) = services(true);
        transport.respond(StatusCode::INTERNAL_SERVER_ERROR, json!({}));

        let filter = TransactionFilter {
            kind: Some(TransactionType::Credit),
            ..Default::default()
        };
        let txns = services.transactions(&filter).await.unwrap();
        assert_eq!(txns.len(), 2);
        assert!(txns.iter().all(|t| t.kind == TransactionType::Credit));
    }

    #[tokio::test]
    async fn test_withdraw_body() {
        let (services, transport) = services(false);
        transport.respond(
            StatusCode::OK,
            json!({ "success": true, "message": "Withdrawal initiated", "transactionId": "TXN1" }),
        );

        let receipt = services
            .withdraw(&WithdrawRequest {
                amount: 2000.0,
                bank_account_id: "b-1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(receipt.transaction_id.as_deref(), Some("TXN1"));
        assert_eq!(
            transport.sent()[0].body(),
            Some(&json!({ "amount": 2000.0, "bankAccountId": "b-1" }))
        );
    }
}
