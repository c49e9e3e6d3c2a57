use serde::de::IgnoredAny;
use serde_json::json;

use super::{demo, Services};
use crate::api::{ApiRequest, ApiResult};
use crate::endpoints::{self, with_id};
use crate::models::savings::GoalsResponse;
use crate::models::{
    AutoSaveConfig, GoalUpdate, LockReceipt, LockSavingsRequest, NewSavingsGoal, SavingsGoal,
};

impl Services {
    // ===== Goals =====

    pub async fn goals(&self) -> ApiResult<Vec<SavingsGoal>> {
        let result = self
            .client
            .get::<GoalsResponse>(endpoints::savings::GOALS)
            .await
            .map(|r| r.goals);
        self.or_demo("goals", result, demo::goals)
    }

    pub async fn create_goal(&self, goal: &NewSavingsGoal) -> ApiResult<SavingsGoal> {
        let result = self.client.post(endpoints::savings::GOALS, goal).await;
        self.or_demo("create_goal", result, || {
            goal.clone().into_goal(demo::generated_id("goal-"))
        })
    }

    pub async fn update_goal(&self, goal_id: &str, update: &GoalUpdate) -> ApiResult<SavingsGoal> {
        self.client
            .put(&with_id(endpoints::savings::GOAL, goal_id), update)
            .await
    }

    pub async fn delete_goal(&self, goal_id: &str) -> ApiResult<()> {
        self.client
            .delete::<IgnoredAny>(&with_id(endpoints::savings::GOAL, goal_id))
            .await
            .map(|_| ())
    }

    /// Move `amount` from the wallet into a goal.
    pub async fn add_to_goal(&self, goal_id: &str, amount: f64) -> ApiResult<()> {
        self.client
            .post::<IgnoredAny, _>(
                &with_id(endpoints::savings::GOAL_ADD, goal_id),
                &json!({ "amount": amount }),
            )
            .await
            .map(|_| ())
    }

    // ===== Locked savings =====

    pub async fn lock_savings(&self, request: &LockSavingsRequest) -> ApiResult<LockReceipt> {
        let result = self.client.post(endpoints::savings::LOCK, request).await;
        self.or_demo("lock_savings", result, demo::lock_receipt)
    }

    // ===== Auto-save =====

    pub async fn auto_save(&self) -> ApiResult<AutoSaveConfig> {
        let result = self.client.get(endpoints::savings::AUTO_SAVE).await;
        self.or_demo("auto_save", result, demo::auto_save)
    }

    pub async fn update_auto_save(&self, config: &AutoSaveConfig) -> ApiResult<()> {
        let request = ApiRequest::put(endpoints::savings::AUTO_SAVE).with_json(config)?;
        self.client
            .request::<IgnoredAny>(request)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::{Method, StatusCode};
    use serde_json::json;

    use crate::models::{GoalUpdate, LockSavingsRequest, NewSavingsGoal, SaveFrequency};
    use crate::services::tests::services;

    fn new_goal() -> NewSavingsGoal {
        NewSavingsGoal {
            name: "Emergency Fund".to_string(),
            target_amount: 100000.0,
            target_date: "2026-12-31".to_string(),
            emoji: "🏠".to_string(),
        }
    }

    #[tokio::test]
    async fn test_goals() {
        let (services, transport) = services(false);
        transport.respond(
            StatusCode::OK,
            json!({ "goals": [{ "id": "g1", "name": "Bike", "targetAmount": 60000,
                "currentAmount": 1500, "targetDate": "2026-09-01", "emoji": "🚗" }] }),
        );

        let goals = services.goals().await.unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].remaining(), 58500.0);
    }

    #[tokio::test]
    async fn test_create_goal_demo_fallback() {
        let (services, transport) = services(true);
        transport.respond(StatusCode::INTERNAL_SERVER_ERROR, json!({}));

        let goal = services.create_goal(&new_goal()).await.unwrap();
        assert!(goal.id.starts_with("goal-"));
        assert_eq!(goal.current_amount, 0.0);
        assert_eq!(goal.name, "Emergency Fund");
    }

    #[tokio::test]
    async fn test_update_goal_has_no_demo_fallback() {
        let (services, transport) = services(true);
        transport.respond(StatusCode::NOT_FOUND, json!({ "message": "Goal not found" }));

        let update = GoalUpdate {
            name: Some("Bigger Bike".to_string()),
            ..Default::default()
        };
        let err = services.update_goal("g 1", &update).await.unwrap_err();
        assert_eq!(err.to_string(), "Goal not found");

        let sent = transport.sent();
        assert_eq!(sent[0].method(), &Method::PUT);
        assert_eq!(sent[0].path(), "/savings/goals/g%201");
    }

    #[tokio::test]
    async fn test_delete_goal_accepts_any_body() {
        let (services, transport) = services(false);
        transport
            .respond(StatusCode::OK, json!({ "success": true }))
            .respond(StatusCode::NO_CONTENT, json!(null));

        services.delete_goal("g1").await.unwrap();
        services.delete_goal("g2").await.unwrap();
        assert_eq!(transport.sent()[1].method(), &Method::DELETE);
    }

    #[tokio::test]
    async fn test_add_to_goal() {
        let (services, transport) = services(false);
        transport.respond(StatusCode::OK, json!({ "success": true }));

        services.add_to_goal("g1", 750.0).await.unwrap();
        let sent = transport.sent();
        assert_eq!(sent[0].path(), "/savings/goals/g1/add");
        assert_eq!(sent[0].body(), Some(&json!({ "amount": 750.0 })));
    }

    #[tokio::test]
    async fn test_lock_savings() {
        let (services, transport) = services(false);
        transport.respond(
            StatusCode::OK,
            json!({ "success": true, "message": "Locked", "lockId": "LOCK9" }),
        );

        let receipt = services
            .lock_savings(&LockSavingsRequest {
                amount: 10000.0,
                lock_period: "6".to_string(),
                reason: None,
            })
            .await
            .unwrap();
        assert_eq!(receipt.lock_id.as_deref(), Some("LOCK9"));
        assert_eq!(
            transport.sent()[0].body(),
            Some(&json!({ "amount": 10000.0, "lockPeriod": "6" }))
        );
    }

    #[tokio::test]
    async fn test_auto_save_demo_default() {
        let (services, transport) = services(true);
        transport.respond(StatusCode::BAD_GATEWAY, json!({}));

        let config = services.auto_save().await.unwrap();
        assert!(!config.enabled);
        assert_eq!(config.frequency, SaveFrequency::Daily);
        assert_eq!(config.amount, 100.0);
    }
}
