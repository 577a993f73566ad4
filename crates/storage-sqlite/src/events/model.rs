//! Database models for economic events.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::{to_naive, to_utc};
use markethub_core::events::{EconomicEvent, EventImpact, NewEconomicEvent};
use markethub_core::Result;

#[derive(Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::economic_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EconomicEventDB {
    pub id: String,
    pub title: String,
    pub country: String,
    pub impact: String,
    pub scheduled_at: NaiveDateTime,
    pub actual: Option<String>,
    pub forecast: Option<String>,
    pub previous: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::economic_events)]
pub struct NewEconomicEventDB {
    pub id: String,
    pub title: String,
    pub country: String,
    pub impact: String,
    pub scheduled_at: NaiveDateTime,
    pub actual: Option<String>,
    pub forecast: Option<String>,
    pub previous: Option<String>,
    pub created_at: NaiveDateTime,
}

impl EconomicEventDB {
    pub fn into_domain(self) -> Result<EconomicEvent> {
        let impact = EventImpact::parse(&self.impact).ok_or_else(|| {
            StorageError::CorruptValue(format!("impact: unknown variant: {}", self.impact))
        })?;

        Ok(EconomicEvent {
            id: self.id,
            title: self.title,
            country: self.country,
            impact,
            scheduled_at: to_utc(self.scheduled_at),
            actual: self.actual,
            forecast: self.forecast,
            previous: self.previous,
            created_at: to_utc(self.created_at),
        })
    }

    pub fn from_domain(domain: EconomicEvent) -> Self {
        Self {
            id: domain.id,
            title: domain.title,
            country: domain.country,
            impact: domain.impact.as_str().to_string(),
            scheduled_at: to_naive(domain.scheduled_at),
            actual: domain.actual,
            forecast: domain.forecast,
            previous: domain.previous,
            created_at: to_naive(domain.created_at),
        }
    }
}

impl NewEconomicEventDB {
    pub fn from_domain(domain: NewEconomicEvent) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: domain.title,
            country: domain.country,
            impact: domain.impact.as_str().to_string(),
            scheduled_at: to_naive(domain.scheduled_at),
            actual: domain.actual,
            forecast: domain.forecast,
            previous: domain.previous,
            created_at: to_naive(chrono::Utc::now()),
        }
    }
}
