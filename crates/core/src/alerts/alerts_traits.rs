use async_trait::async_trait;

use crate::alerts::alerts_model::{NewUserAlert, TriggeredAlert, UserAlert};
use crate::errors::Result;

/// Trait for alert repository operations
///
/// Mutations are user-scoped: the `user_id` belongs in the query predicate,
/// not in an after-the-fact ownership check.
#[async_trait]
pub trait AlertRepositoryTrait: Send + Sync {
    fn find_for_user(&self, alert_id: &str, user_id: &str) -> Result<UserAlert>;
    fn list_for_user(&self, user_id: &str) -> Result<Vec<UserAlert>>;
    fn list_active(&self) -> Result<Vec<UserAlert>>;
    async fn create(&self, new_alert: NewUserAlert) -> Result<UserAlert>;
    async fn set_active(&self, alert_id: &str, user_id: &str, active: bool) -> Result<UserAlert>;
    async fn delete(&self, alert_id: &str, user_id: &str) -> Result<usize>;
}

/// Trait for alerts service operations
#[async_trait]
pub trait AlertsServiceTrait: Send + Sync {
    fn list_alerts(&self, user_id: &str) -> Result<Vec<UserAlert>>;
    async fn create_alert(&self, new_alert: NewUserAlert) -> Result<UserAlert>;
    async fn set_alert_active(
        &self,
        alert_id: &str,
        user_id: &str,
        active: bool,
    ) -> Result<UserAlert>;
    async fn delete_alert(&self, alert_id: &str, user_id: &str) -> Result<usize>;
    /// Evaluate every active alert against current prices and return the
    /// set whose predicate holds. Alerts stay active afterwards.
    async fn check_price_alerts(&self) -> Result<Vec<TriggeredAlert>>;
}
