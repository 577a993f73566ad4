use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use markethub_core::pagination::{Page, PageRequest};
use markethub_core::users::{NewUser, User, UserRepositoryTrait};
use markethub_core::Result;

use super::model::{NewUserDB, UserDB};
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn find_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let db = users::table
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(db.into())
    }

    fn find_by_username(&self, username: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let db = users::table
            .filter(users::username.eq(username))
            .first::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(db.into())
    }

    fn find_by_email(&self, email: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let db = users::table
            .filter(users::email.eq(email))
            .first::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(db.into())
    }

    fn list(&self, page: PageRequest) -> Result<Page<User>> {
        let mut conn = get_connection(&self.pool)?;
        let total = users::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        let rows = users::table
            .order(users::created_at.asc())
            .limit(page.limit)
            .offset(page.offset)
            .load::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Page::new(rows.into_iter().map(User::from).collect(), total))
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let new_db = NewUserDB::from_domain(new_user);
        let db: UserDB = diesel::insert_into(users::table)
            .values(&new_db)
            .returning(UserDB::as_returning())
            .get_result(&mut conn)
            .map_err(StorageError::from)?;
        Ok(db.into())
    }

    async fn delete(&self, user_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let affected = diesel::delete(users::table.find(user_id))
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(affected)
    }
}
