//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Identifiers come from the `users.id` serial sequence, so ascending `id`
//! order is insertion order.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        _ => UserPersistenceError::query("database error"),
    }
}

/// Rows are written only through validated domain values; a row that fails
/// validation means the table was edited out of band.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    User::try_from_parts(row.id, row.username, row.email, row.password).map_err(|err| {
        warn!(user_id = id, error = %err, "stored user row failed validation");
        UserPersistenceError::query(format!("stored user {id} is invalid: {err}"))
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn save(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            username: user.username().as_ref(),
            email: user.email().as_ref(),
            password: user.password().expose(),
        };

        let stored = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_user(stored)
    }

    async fn update(&self, user: &User) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserChangeset {
            username: user.username().as_ref(),
            email: user.email().as_ref(),
            password: user.password().expose(),
        };

        diesel::update(users::table.find(user.id().get()))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Mapping coverage that needs no database; see `tests/diesel_user_repository.rs`
    //! for the round trip against PostgreSQL.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn row(id: i32, email: &str) -> UserRow {
        UserRow {
            id,
            username: "Aks".to_owned(),
            email: email.to_owned(),
            password: "1223".to_owned(),
        }
    }

    #[rstest]
    fn pool_errors_are_connection_errors() {
        assert!(matches!(
            map_pool_error(PoolError::checkout("timed out")),
            UserPersistenceError::Connection { .. }
        ));
        assert!(matches!(
            map_pool_error(PoolError::build("bad url")),
            UserPersistenceError::Connection { .. }
        ));
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(DieselError::RollbackTransaction, "database error")]
    #[case(
        DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation,
            Box::new("check failed".to_owned()),
        ),
        "database error"
    )]
    fn diesel_errors_are_query_errors(#[case] error: DieselError, #[case] expected: &str) {
        assert_eq!(map_diesel_error(error), UserPersistenceError::query(expected));
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        assert_eq!(
            map_diesel_error(error),
            UserPersistenceError::connection("database connection error")
        );
    }

    #[rstest]
    fn valid_rows_become_users() {
        let user = row_to_user(row(3, "aks@g.com")).expect("valid row");
        assert_eq!(user.id().get(), 3);
        assert_eq!(user.email().as_ref(), "aks@g.com");
    }

    #[rstest]
    fn invalid_rows_surface_as_query_errors() {
        let error = row_to_user(row(4, "not-an-email")).expect_err("invalid row");
        assert!(matches!(error, UserPersistenceError::Query { .. }));
        assert!(error.to_string().contains("stored user 4 is invalid"));
    }
}
