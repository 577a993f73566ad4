//! Database models for watchlist entries.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{parse_kind, to_naive, to_utc};
use markethub_core::watchlists::{NewWatchlistEntry, WatchlistEntry};
use markethub_core::Result;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::watchlist_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WatchlistEntryDB {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub kind: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::watchlist_entries)]
pub struct NewWatchlistEntryDB {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub kind: String,
    pub created_at: NaiveDateTime,
}

impl WatchlistEntryDB {
    pub fn into_domain(self) -> Result<WatchlistEntry> {
        Ok(WatchlistEntry {
            id: self.id,
            user_id: self.user_id,
            symbol: self.symbol,
            kind: parse_kind(&self.kind)?,
            created_at: to_utc(self.created_at),
        })
    }
}

impl NewWatchlistEntryDB {
    pub fn from_domain(domain: NewWatchlistEntry) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: domain.user_id,
            symbol: domain.symbol,
            kind: domain.kind.as_str().to_string(),
            created_at: to_naive(chrono::Utc::now()),
        }
    }
}
