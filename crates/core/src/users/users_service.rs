use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::{Result, ValidationError};
use crate::pagination::{Page, PageRequest};
use crate::users::users_model::{NewUser, User};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};

pub struct UserService {
    user_repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(user_repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { user_repository }
    }

    fn validate(new_user: &NewUser) -> Result<()> {
        if new_user.username.trim().is_empty() {
            return Err(ValidationError::MissingField("username".to_string()).into());
        }
        if !new_user.email.contains('@') {
            return Err(
                ValidationError::InvalidInput(format!("invalid email: {}", new_user.email)).into(),
            );
        }
        if new_user.password_hash.trim().is_empty() {
            return Err(ValidationError::MissingField("passwordHash".to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_user(&self, user_id: &str) -> Result<User> {
        self.user_repository.find_by_id(user_id)
    }

    fn get_by_username(&self, username: &str) -> Result<User> {
        self.user_repository.find_by_username(username)
    }

    fn list_users(&self, page: PageRequest) -> Result<Page<User>> {
        self.user_repository.list(page)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        Self::validate(&new_user)?;
        debug!("creating user '{}'", new_user.username);
        self.user_repository.create(new_user).await
    }

    async fn delete_user(&self, user_id: &str) -> Result<usize> {
        self.user_repository.delete(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    struct StubRepo;

    #[async_trait]
    impl UserRepositoryTrait for StubRepo {
        fn find_by_id(&self, _user_id: &str) -> Result<User> {
            unimplemented!()
        }
        fn find_by_username(&self, _username: &str) -> Result<User> {
            unimplemented!()
        }
        fn find_by_email(&self, _email: &str) -> Result<User> {
            unimplemented!()
        }
        fn list(&self, _page: PageRequest) -> Result<Page<User>> {
            unimplemented!()
        }
        async fn create(&self, new_user: NewUser) -> Result<User> {
            Ok(User {
                id: "u-1".to_string(),
                username: new_user.username,
                email: new_user.email,
                password_hash: new_user.password_hash,
                created_at: chrono::Utc::now(),
            })
        }
        async fn delete(&self, _user_id: &str) -> Result<usize> {
            Ok(1)
        }
    }

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[tokio::test]
    async fn create_rejects_blank_username() {
        let service = UserService::new(Arc::new(StubRepo));
        let err = service
            .create_user(new_user("  ", "a@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_bad_email() {
        let service = UserService::new(Arc::new(StubRepo));
        let err = service
            .create_user(new_user("alice", "not-an-email"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn create_passes_valid_input_through() {
        let service = UserService::new(Arc::new(StubRepo));
        let user = service
            .create_user(new_user("alice", "alice@example.com"))
            .await
            .unwrap();
        assert_eq!(user.username, "alice");
    }
}
