//! User lifecycle service.
//!
//! Implements both driving ports on top of a [`UserRepository`]. Validation
//! happens before values reach the service, so every operation here works
//! with already-canonical domain types.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, User, UserChanges, UserId};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn user_not_found(id: UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

/// Create, update, and read users through a repository.
#[derive(Clone)]
pub struct UserService<R> {
    user_repo: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service over the given repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn add_user(&self, user: NewUser) -> Result<User, Error> {
        self.user_repo
            .save(&user)
            .await
            .map_err(map_repository_error)
    }

    async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User, Error> {
        let existing = self
            .user_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| user_not_found(id))?;
        if changes.is_empty() {
            return Ok(existing);
        }

        // The record may vanish between the read and the write.
        self.user_repo
            .update(&changes.apply(existing))
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| user_not_found(id))
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error> {
        self.user_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }

    async fn view_all_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo
            .find_all()
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
