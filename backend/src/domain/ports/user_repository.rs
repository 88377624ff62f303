//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Storage for user records.
///
/// Implementations assign identifiers on [`save`](UserRepository::save) and
/// return records from [`find_all`](UserRepository::find_all) in ascending
/// identifier order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new record and return it with its assigned identifier.
    async fn save(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Overwrite the mutable fields of an existing record.
    ///
    /// Returns `Ok(None)` when no record has the user's identifier; nothing is
    /// inserted in that case.
    async fn update(&self, user: &User) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch every stored user.
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;
}
