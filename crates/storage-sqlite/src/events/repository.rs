use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use markethub_core::events::{EconomicEvent, EventRepositoryTrait, NewEconomicEvent};
use markethub_core::pagination::{Page, PageRequest};
use markethub_core::Result;

use super::model::{EconomicEventDB, NewEconomicEventDB};
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::economic_events;
use crate::utils::to_naive;

pub struct EventRepository {
    pool: Arc<DbPool>,
}

impl EventRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn into_domain_vec(rows: Vec<EconomicEventDB>) -> Result<Vec<EconomicEvent>> {
        rows.into_iter().map(EconomicEventDB::into_domain).collect()
    }
}

#[async_trait]
impl EventRepositoryTrait for EventRepository {
    fn find_by_id(&self, event_id: &str) -> Result<EconomicEvent> {
        let mut conn = get_connection(&self.pool)?;
        let db = economic_events::table
            .find(event_id)
            .first::<EconomicEventDB>(&mut conn)
            .map_err(StorageError::from)?;
        db.into_domain()
    }

    fn list(&self, page: PageRequest) -> Result<Page<EconomicEvent>> {
        let mut conn = get_connection(&self.pool)?;
        let total = economic_events::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        let rows = economic_events::table
            .order(economic_events::scheduled_at.asc())
            .limit(page.limit)
            .offset(page.offset)
            .load::<EconomicEventDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Page::new(Self::into_domain_vec(rows)?, total))
    }

    fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<EconomicEvent>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = economic_events::table
            .filter(economic_events::scheduled_at.ge(to_naive(from)))
            .filter(economic_events::scheduled_at.le(to_naive(to)))
            .order(economic_events::scheduled_at.asc())
            .load::<EconomicEventDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::into_domain_vec(rows)
    }

    async fn create(&self, new_event: NewEconomicEvent) -> Result<EconomicEvent> {
        let mut conn = get_connection(&self.pool)?;
        let new_db = NewEconomicEventDB::from_domain(new_event);
        let db: EconomicEventDB = diesel::insert_into(economic_events::table)
            .values(&new_db)
            .returning(EconomicEventDB::as_returning())
            .get_result(&mut conn)
            .map_err(StorageError::from)?;
        db.into_domain()
    }

    async fn update(&self, event: EconomicEvent) -> Result<EconomicEvent> {
        let mut conn = get_connection(&self.pool)?;
        let event_id = event.id.clone();
        let db = EconomicEventDB::from_domain(event);
        diesel::update(economic_events::table.find(&event_id))
            .set(&db)
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        let stored = economic_events::table
            .find(&event_id)
            .first::<EconomicEventDB>(&mut conn)
            .map_err(StorageError::from)?;
        stored.into_domain()
    }

    async fn delete(&self, event_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let affected = diesel::delete(economic_events::table.find(event_id))
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(affected)
    }

    async fn delete_scheduled_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let affected = diesel::delete(
            economic_events::table.filter(economic_events::scheduled_at.lt(to_naive(cutoff))),
        )
        .execute(&mut conn)
        .map_err(StorageError::from)?;
        Ok(affected)
    }
}
