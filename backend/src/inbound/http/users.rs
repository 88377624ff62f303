//! Users API handlers.
//!
//! ```text
//! POST /api/user               {"username":"Aks","email":"aks@g.com","password":"1223"}
//! PUT  /api/user/update/{id}   {"username":"Aksay","email":"aksay@g.com"}
//! GET  /api/user/find/{id}
//! GET  /api/users
//! ```

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Error, NewUser, User, UserChanges, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_user_id, validation_error};

/// Request body for creating or updating a user.
///
/// Every field is optional at the JSON level so that absent fields surface
/// as `missing_field` validation errors rather than opaque decode failures.
/// Any `id` (or `user_id`) is accepted and ignored. Sending both spellings
/// in one body is a duplicate field and fails with `invalid_request`.
///
/// Example JSON:
/// `{"username":"Aks","email":"aks@g.com","password":"1223"}`
#[derive(Debug, Default, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UserPayload {
    #[serde(alias = "user_id", skip_serializing_if = "Option::is_none")]
    #[schema(example = 1)]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Aks")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "aks@g.com")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "1223")]
    pub password: Option<String>,
}

impl TryFrom<UserPayload> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: UserPayload) -> Result<Self, Self::Error> {
        NewUser::try_from_fields(value.username, value.email, value.password)
    }
}

impl TryFrom<UserPayload> for UserChanges {
    type Error = UserValidationError;

    fn try_from(value: UserPayload) -> Result<Self, Self::Error> {
        UserChanges::try_from_fields(value.username, value.email, value.password)
    }
}

/// Create a user. The identifier is assigned by the server.
#[utoipa::path(
    post,
    path = "/api/user",
    request_body = UserPayload,
    responses(
        (status = 200, description = "Stored user", body = UserSchema),
        (status = 400, description = "Malformed body or validation failure", body = ErrorSchema),
        (status = 503, description = "Repository unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "addUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<User>> {
    let candidate =
        NewUser::try_from(payload.into_inner()).map_err(|err| validation_error(&err))?;
    let user = state.users_command.add_user(candidate).await?;
    info!(user_id = %user.id(), "user created");
    Ok(web::Json(user))
}

/// Replace the supplied fields of an existing user.
///
/// Absent fields keep their stored value. The path identifier wins over any
/// `id` in the body. Unknown identifiers yield 404 and nothing is created.
#[utoipa::path(
    put,
    path = "/api/user/update/{id}",
    params(("id" = i32, Path, description = "User identifier", minimum = 1)),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Malformed body, bad id, or validation failure", body = ErrorSchema),
        (status = 404, description = "No user with this id", body = ErrorSchema),
        (status = 503, description = "Repository unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/user/update/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path.into_inner())?;
    let changes =
        UserChanges::try_from(payload.into_inner()).map_err(|err| validation_error(&err))?;
    let user = state.users_command.update_user(id, changes).await?;
    info!(user_id = %id, "user updated");
    Ok(web::Json(user))
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/api/user/find/{id}",
    params(("id" = i32, Path, description = "User identifier", minimum = 1)),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 400, description = "Bad id", body = ErrorSchema),
        (status = 404, description = "No user with this id", body = ErrorSchema),
        (status = 503, description = "Repository unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "findUser"
)]
#[get("/user/find/{id}")]
pub async fn find_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path.into_inner())?;
    let user = state
        .users_query
        .find_user(id)
        .await?
        .ok_or_else(|| Error::not_found(format!("user {id} not found")))?;
    Ok(web::Json(user))
}

/// List every user in ascending identifier order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_service::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 503, description = "Repository unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "viewAllUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.view_all_users().await?;
    Ok(web::Json(users))
}

/// The `/api` scope with every user route and JSON error mapping installed.
///
/// Expects [`HttpState`] to be registered as app data.
pub fn users_scope() -> actix_web::Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(create_user)
        .service(update_user)
        .service(find_user)
        .service(list_users)
}
