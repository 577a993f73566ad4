use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::info;

use crate::errors::{Result, ValidationError};
use crate::events::events_model::{EconomicEvent, NewEconomicEvent};
use crate::events::events_traits::{EventRepositoryTrait, EventsServiceTrait};
use crate::pagination::{Page, PageRequest};

pub struct EventsService {
    event_repository: Arc<dyn EventRepositoryTrait>,
}

impl EventsService {
    pub fn new(event_repository: Arc<dyn EventRepositoryTrait>) -> Self {
        Self { event_repository }
    }
}

#[async_trait]
impl EventsServiceTrait for EventsService {
    fn get_event(&self, event_id: &str) -> Result<EconomicEvent> {
        self.event_repository.find_by_id(event_id)
    }

    fn list_events(&self, page: PageRequest) -> Result<Page<EconomicEvent>> {
        self.event_repository.list(page)
    }

    fn upcoming(&self, days_ahead: i64) -> Result<Vec<EconomicEvent>> {
        let now = Utc::now();
        self.event_repository
            .list_between(now, now + Duration::days(days_ahead.max(0)))
    }

    async fn create_event(&self, new_event: NewEconomicEvent) -> Result<EconomicEvent> {
        if new_event.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if new_event.country.trim().is_empty() {
            return Err(ValidationError::MissingField("country".to_string()).into());
        }
        self.event_repository.create(new_event).await
    }

    async fn update_event(&self, event: EconomicEvent) -> Result<EconomicEvent> {
        self.event_repository.update(event).await
    }

    async fn delete_event(&self, event_id: &str) -> Result<usize> {
        self.event_repository.delete(event_id).await
    }

    async fn prune_old(&self, retention_days: i64) -> Result<usize> {
        let cutoff = Utc::now() - Duration::days(retention_days.max(0));
        let removed = self.event_repository.delete_scheduled_before(cutoff).await?;
        if removed > 0 {
            info!("pruned {} economic events older than {} days", removed, retention_days);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::events_model::EventImpact;
    use chrono::DateTime;
    use std::sync::Mutex;

    struct InMemoryEvents {
        events: Mutex<Vec<EconomicEvent>>,
    }

    impl InMemoryEvents {
        fn with(events: Vec<EconomicEvent>) -> Self {
            Self {
                events: Mutex::new(events),
            }
        }
    }

    #[async_trait]
    impl EventRepositoryTrait for InMemoryEvents {
        fn find_by_id(&self, _event_id: &str) -> Result<EconomicEvent> {
            unimplemented!()
        }
        fn list(&self, _page: PageRequest) -> Result<Page<EconomicEvent>> {
            unimplemented!()
        }
        fn list_between(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> Result<Vec<EconomicEvent>> {
            Ok(self
                .events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.scheduled_at >= from && e.scheduled_at <= to)
                .cloned()
                .collect())
        }
        async fn create(&self, _new_event: NewEconomicEvent) -> Result<EconomicEvent> {
            unimplemented!()
        }
        async fn update(&self, event: EconomicEvent) -> Result<EconomicEvent> {
            Ok(event)
        }
        async fn delete(&self, _event_id: &str) -> Result<usize> {
            Ok(1)
        }
        async fn delete_scheduled_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
            let mut events = self.events.lock().unwrap();
            let before = events.len();
            events.retain(|e| e.scheduled_at >= cutoff);
            Ok(before - events.len())
        }
    }

    fn event(id: &str, offset_days: i64) -> EconomicEvent {
        EconomicEvent {
            id: id.to_string(),
            title: "CPI release".to_string(),
            country: "US".to_string(),
            impact: EventImpact::High,
            scheduled_at: Utc::now() + Duration::days(offset_days),
            actual: None,
            forecast: Some("3.2%".to_string()),
            previous: Some("3.4%".to_string()),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn prune_removes_only_stale_events() {
        let repo = Arc::new(InMemoryEvents::with(vec![
            event("old", -40),
            event("recent", -3),
            event("future", 2),
        ]));
        let service = EventsService::new(repo.clone());

        let removed = service.prune_old(30).await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(repo.events.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn upcoming_window_excludes_past_and_far_future() {
        let repo = Arc::new(InMemoryEvents::with(vec![
            event("past", -1),
            event("soon", 2),
            event("far", 30),
        ]));
        let service = EventsService::new(repo);

        let upcoming = service.upcoming(7).unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, "soon");
    }

    #[tokio::test]
    async fn create_requires_title_and_country() {
        let service = EventsService::new(Arc::new(InMemoryEvents::with(vec![])));
        let result = service
            .create_event(NewEconomicEvent {
                title: " ".to_string(),
                country: "US".to_string(),
                impact: EventImpact::Low,
                scheduled_at: Utc::now(),
                actual: None,
                forecast: None,
                previous: None,
            })
            .await;
        assert!(result.is_err());
    }
}
