use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::events::events_model::{EconomicEvent, NewEconomicEvent};
use crate::pagination::{Page, PageRequest};

/// Trait for economic event repository operations
#[async_trait]
pub trait EventRepositoryTrait: Send + Sync {
    fn find_by_id(&self, event_id: &str) -> Result<EconomicEvent>;
    /// Ordered by `scheduled_at` ascending.
    fn list(&self, page: PageRequest) -> Result<Page<EconomicEvent>>;
    fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<EconomicEvent>>;
    async fn create(&self, new_event: NewEconomicEvent) -> Result<EconomicEvent>;
    async fn update(&self, event: EconomicEvent) -> Result<EconomicEvent>;
    async fn delete(&self, event_id: &str) -> Result<usize>;
    /// Delete events scheduled before the cutoff. Returns rows removed.
    async fn delete_scheduled_before(&self, cutoff: DateTime<Utc>) -> Result<usize>;
}

/// Trait for events service operations
#[async_trait]
pub trait EventsServiceTrait: Send + Sync {
    fn get_event(&self, event_id: &str) -> Result<EconomicEvent>;
    fn list_events(&self, page: PageRequest) -> Result<Page<EconomicEvent>>;
    /// Events scheduled between now and now + `days_ahead`.
    fn upcoming(&self, days_ahead: i64) -> Result<Vec<EconomicEvent>>;
    async fn create_event(&self, new_event: NewEconomicEvent) -> Result<EconomicEvent>;
    async fn update_event(&self, event: EconomicEvent) -> Result<EconomicEvent>;
    async fn delete_event(&self, event_id: &str) -> Result<usize>;
    /// Drop events older than the retention window. Returns rows removed.
    async fn prune_old(&self, retention_days: i64) -> Result<usize>;
}
