//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserChanges, UserId};

/// Domain use-case port for creating and updating users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Store a new user and return the stored record.
    async fn add_user(&self, user: NewUser) -> Result<User, Error>;

    /// Apply `changes` to the user at `id`.
    ///
    /// Fails with a `not_found` error when no such user exists.
    async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User, Error>;
}
