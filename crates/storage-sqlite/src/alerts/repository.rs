use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use markethub_core::alerts::{AlertRepositoryTrait, NewUserAlert, UserAlert};
use markethub_core::errors::DatabaseError;
use markethub_core::Result;

use super::model::{NewUserAlertDB, UserAlertDB};
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::user_alerts;

pub struct AlertRepository {
    pool: Arc<DbPool>,
}

impl AlertRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn into_domain_vec(rows: Vec<UserAlertDB>) -> Result<Vec<UserAlert>> {
        rows.into_iter().map(UserAlertDB::into_domain).collect()
    }
}

#[async_trait]
impl AlertRepositoryTrait for AlertRepository {
    fn find_for_user(&self, alert_id: &str, user_id: &str) -> Result<UserAlert> {
        let mut conn = get_connection(&self.pool)?;
        let db = user_alerts::table
            .find(alert_id)
            .filter(user_alerts::user_id.eq(user_id))
            .first::<UserAlertDB>(&mut conn)
            .map_err(StorageError::from)?;
        db.into_domain()
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<UserAlert>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = user_alerts::table
            .filter(user_alerts::user_id.eq(user_id))
            .order(user_alerts::created_at.desc())
            .load::<UserAlertDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::into_domain_vec(rows)
    }

    fn list_active(&self) -> Result<Vec<UserAlert>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = user_alerts::table
            .filter(user_alerts::active.eq(true))
            .load::<UserAlertDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::into_domain_vec(rows)
    }

    async fn create(&self, new_alert: NewUserAlert) -> Result<UserAlert> {
        let mut conn = get_connection(&self.pool)?;
        let new_db = NewUserAlertDB::from_domain(new_alert);
        let db: UserAlertDB = diesel::insert_into(user_alerts::table)
            .values(&new_db)
            .returning(UserAlertDB::as_returning())
            .get_result(&mut conn)
            .map_err(StorageError::from)?;
        db.into_domain()
    }

    async fn set_active(&self, alert_id: &str, user_id: &str, active: bool) -> Result<UserAlert> {
        let mut conn = get_connection(&self.pool)?;
        // The user scope lives in the predicate; zero rows means the alert
        // does not exist for this user.
        let affected = diesel::update(
            user_alerts::table
                .find(alert_id)
                .filter(user_alerts::user_id.eq(user_id)),
        )
        .set(user_alerts::active.eq(active))
        .execute(&mut conn)
        .map_err(StorageError::from)?;

        if affected == 0 {
            return Err(DatabaseError::NotFound(format!("alert {}", alert_id)).into());
        }

        let db = user_alerts::table
            .find(alert_id)
            .first::<UserAlertDB>(&mut conn)
            .map_err(StorageError::from)?;
        db.into_domain()
    }

    async fn delete(&self, alert_id: &str, user_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let affected = diesel::delete(
            user_alerts::table
                .find(alert_id)
                .filter(user_alerts::user_id.eq(user_id)),
        )
        .execute(&mut conn)
        .map_err(StorageError::from)?;
        Ok(affected)
    }
}
