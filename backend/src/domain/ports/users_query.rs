//! Driving port for user reads.
//!
//! Inbound adapters use this port to fetch user records without importing
//! outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Look up a single user. Absence is `Ok(None)`, not an error.
    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error>;

    /// Every stored user in ascending identifier order.
    async fn view_all_users(&self) -> Result<Vec<User>, Error>;
}
