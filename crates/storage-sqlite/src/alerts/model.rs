//! Database models for price alerts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::{parse_decimal, parse_kind, to_naive, to_utc};
use markethub_core::alerts::{AlertDirection, NewUserAlert, UserAlert};
use markethub_core::Result;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_alerts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserAlertDB {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub kind: String,
    pub price_target: String,
    pub direction: String,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::user_alerts)]
pub struct NewUserAlertDB {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub kind: String,
    pub price_target: String,
    pub direction: String,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

impl UserAlertDB {
    pub fn into_domain(self) -> Result<UserAlert> {
        let direction = AlertDirection::parse(&self.direction).ok_or_else(|| {
            StorageError::CorruptValue(format!("direction: unknown variant: {}", self.direction))
        })?;

        Ok(UserAlert {
            id: self.id,
            user_id: self.user_id,
            symbol: self.symbol,
            kind: parse_kind(&self.kind)?,
            price_target: parse_decimal("price_target", &self.price_target)?,
            direction,
            active: self.active,
            created_at: to_utc(self.created_at),
        })
    }
}

impl NewUserAlertDB {
    pub fn from_domain(domain: NewUserAlert) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: domain.user_id,
            symbol: domain.symbol,
            kind: domain.kind.as_str().to_string(),
            price_target: domain.price_target.to_string(),
            direction: domain.direction.as_str().to_string(),
            active: true,
            created_at: to_naive(chrono::Utc::now()),
        }
    }
}
