//! Users API handlers.
//!
//! ```text
//! GET  /api/users
//! POST /api/users      {"firstname":"John","lastname":"Doe","email":"john@wild.co","city":"Cambridge","language":"english"}
//! GET  /api/users/{id}
//! PUT  /api/users/{id} {"firstname":"John", ...}
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::domain::ports::UserPersistenceError;
use crate::domain::{Error, User, UserId, UserProfile, UserProfileDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserPayloadSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    json_error_handler, map_user_validation_error, parse_user_id,
};

/// Response body for `POST /api/users`.
///
/// Example JSON: `{"id":1}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreatedUser {
    /// Identifier assigned to the new user.
    #[schema(example = 1)]
    pub id: i64,
}

impl From<UserId> for CreatedUser {
    fn from(value: UserId) -> Self {
        Self { id: value.get() }
    }
}

/// JSON extractor configuration for user payloads.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Register the user routes and their JSON configuration.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use users_api::inbound::http::users;
///
/// let app = App::new().service(web::scope("/api").configure(users::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(list_users)
        .service(create_user)
        .service(get_user)
        .service(update_user);
}

fn map_persistence_error(err: UserPersistenceError) -> Error {
    error!(error = %err, "user repository failure");
    Error::internal(err.to_string())
}

fn validate(payload: web::Json<UserProfileDraft>) -> ApiResult<UserProfile> {
    UserProfile::try_from(payload.into_inner()).map_err(|err| {
        warn!(error = %err, "rejected user payload");
        map_user_validation_error(err)
    })
}

/// List every user ordered by id.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list_users().await.map_err(map_persistence_error)?;
    Ok(web::Json(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "No user with that id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let raw = path.into_inner();
    let id = parse_user_id(&raw)?;
    let user = state
        .users
        .get_user(id)
        .await
        .map_err(map_persistence_error)?
        .ok_or_else(|| Error::not_found(format!("user {id} not found")))?;
    Ok(web::Json(user))
}

/// Create a user from all five fields.
///
/// Incomplete bodies are rejected with status 500 and code
/// `invalid_request`; nothing is stored.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayloadSchema,
    responses(
        (status = 201, description = "User created", body = CreatedUser),
        (status = 500, description = "Missing fields or internal error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserProfileDraft>,
) -> ApiResult<HttpResponse> {
    let profile = validate(payload)?;
    let id = state
        .users
        .create_user(&profile)
        .await
        .map_err(map_persistence_error)?;
    info!(user_id = %id, "user created");
    Ok(HttpResponse::Created().json(CreatedUser::from(id)))
}

/// Replace all five fields of an existing user.
///
/// The body is validated before the id is looked at, so an incomplete body
/// wins over an unknown id.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserPayloadSchema,
    responses(
        (status = 204, description = "User updated"),
        (status = 404, description = "No user with that id", body = ErrorSchema),
        (status = 500, description = "Missing fields or internal error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserProfileDraft>,
) -> ApiResult<HttpResponse> {
    let profile = validate(payload)?;
    let raw = path.into_inner();
    let id = parse_user_id(&raw)?;
    let matched = state
        .users
        .update_user(id, &profile)
        .await
        .map_err(map_persistence_error)?;
    if matched == 0 {
        return Err(Error::not_found(format!("user {id} not found")));
    }
    info!(user_id = %id, "user updated");
    Ok(HttpResponse::NoContent()
        .content_type(ContentType::json())
        .finish())
}
