//! In-process `UserRepository` used when no database is configured.
//!
//! Records live in a `BTreeMap` keyed by identifier, so iteration order is
//! ascending `id`, which is also insertion order. State is lost on restart.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

#[derive(Debug, Default)]
struct Store {
    last_id: i32,
    users: BTreeMap<UserId, User>,
}

/// Mutex-guarded map of users with a monotonically increasing id counter.
///
/// # Examples
/// ```
/// use users_service::outbound::memory::InMemoryUserRepository;
///
/// let repo = InMemoryUserRepository::new();
/// assert!(repo.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.lock().map(|store| store.users.is_empty()).unwrap_or(true)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserPersistenceError> {
        self.store
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory user store poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut store = self.lock()?;
        let next = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;
        let id = UserId::new(next).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let stored = user.clone().with_id(id);
        store.last_id = next;
        store.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, user: &User) -> Result<Option<User>, UserPersistenceError> {
        let mut store = self.lock()?;
        Ok(store.users.get_mut(&user.id()).map(|slot| {
            *slot = user.clone();
            slot.clone()
        }))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.users.values().cloned().collect())
    }
}
