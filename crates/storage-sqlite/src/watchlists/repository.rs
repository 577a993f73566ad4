use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use markethub_core::watchlists::{NewWatchlistEntry, WatchlistEntry, WatchlistRepositoryTrait};
use markethub_core::Result;
use markethub_market_data::AssetKind;

use super::model::{NewWatchlistEntryDB, WatchlistEntryDB};
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::watchlist_entries;

pub struct WatchlistRepository {
    pool: Arc<DbPool>,
}

impl WatchlistRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WatchlistRepositoryTrait for WatchlistRepository {
    fn list_for_user(&self, user_id: &str) -> Result<Vec<WatchlistEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = watchlist_entries::table
            .filter(watchlist_entries::user_id.eq(user_id))
            .order(watchlist_entries::created_at.asc())
            .load::<WatchlistEntryDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(WatchlistEntryDB::into_domain).collect()
    }

    fn find_entry(&self, user_id: &str, symbol: &str, kind: AssetKind) -> Result<WatchlistEntry> {
        let mut conn = get_connection(&self.pool)?;
        let db = watchlist_entries::table
            .filter(watchlist_entries::user_id.eq(user_id))
            .filter(watchlist_entries::symbol.eq(symbol))
            .filter(watchlist_entries::kind.eq(kind.as_str()))
            .first::<WatchlistEntryDB>(&mut conn)
            .map_err(StorageError::from)?;
        db.into_domain()
    }

    async fn insert_ignore(&self, entry: NewWatchlistEntry) -> Result<WatchlistEntry> {
        let mut conn = get_connection(&self.pool)?;
        let new_db = NewWatchlistEntryDB::from_domain(entry);

        diesel::insert_into(watchlist_entries::table)
            .values(&new_db)
            .on_conflict((
                watchlist_entries::user_id,
                watchlist_entries::symbol,
                watchlist_entries::kind,
            ))
            .do_nothing()
            .execute(&mut conn)
            .map_err(StorageError::from)?;

        // Conflict or not, the stored row is the answer.
        let db = watchlist_entries::table
            .filter(watchlist_entries::user_id.eq(&new_db.user_id))
            .filter(watchlist_entries::symbol.eq(&new_db.symbol))
            .filter(watchlist_entries::kind.eq(&new_db.kind))
            .first::<WatchlistEntryDB>(&mut conn)
            .map_err(StorageError::from)?;
        db.into_domain()
    }

    async fn delete(&self, user_id: &str, symbol: &str, kind: AssetKind) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let affected = diesel::delete(
            watchlist_entries::table
                .filter(watchlist_entries::user_id.eq(user_id))
                .filter(watchlist_entries::symbol.eq(symbol))
                .filter(watchlist_entries::kind.eq(kind.as_str())),
        )
        .execute(&mut conn)
        .map_err(StorageError::from)?;
        Ok(affected)
    }
}
