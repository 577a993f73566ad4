use async_trait::async_trait;

use crate::errors::Result;
use crate::pagination::{Page, PageRequest};
use crate::users::users_model::{NewUser, User};

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_id(&self, user_id: &str) -> Result<User>;
    fn find_by_username(&self, username: &str) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<User>;
    fn list(&self, page: PageRequest) -> Result<Page<User>>;
    async fn create(&self, new_user: NewUser) -> Result<User>;
    async fn delete(&self, user_id: &str) -> Result<usize>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn get_by_username(&self, username: &str) -> Result<User>;
    fn list_users(&self, page: PageRequest) -> Result<Page<User>>;
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
    async fn delete_user(&self, user_id: &str) -> Result<usize>;
}
