//! Users API handlers.
//!
//! ```text
//! GET    /api/v1/users?page=1&limit=10
//! POST   /api/v1/users {"name":"John Doe","email":"john@example.com","age":30}
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id} {"age":31}
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::PageInfo;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreateUserInput, UpdateUserInput};
use crate::domain::{Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::SuccessEnvelope;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/users`.
///
/// Missing fields default to empty/zero and then fail validation with a
/// field-specific message.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreateUserRequest {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john@example.com")]
    pub email: String,
    #[schema(example = 30)]
    pub age: i32,
}

impl From<CreateUserRequest> for CreateUserInput {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            age: value.age,
        }
    }
}

/// Request body for `PUT /api/v1/users/{id}`.
///
/// Absent fields are left unchanged. Present fields are validated, so an
/// explicit `""` or `0` is rejected rather than ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl From<UpdateUserRequest> for UpdateUserInput {
    fn from(value: UpdateUserRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            age: value.age,
        }
    }
}

/// Public projection of a stored user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name.into(),
            email: user.email.into(),
            age: user.age.get(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Pagination block of the list payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct PaginationResponse {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl From<PageInfo> for PaginationResponse {
    fn from(info: PageInfo) -> Self {
        Self {
            total: info.total,
            page: info.page,
            limit: info.limit,
        }
    }
}

/// Payload of `GET /api/v1/users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub pagination: PaginationResponse,
}

/// Query string of `GET /api/v1/users`.
///
/// Values are taken leniently: anything that is not an integer is treated as
/// absent and the default applies.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// 1-based page number; values below 1 become 1.
    #[param(value_type = Option<i64>, example = 1)]
    pub page: Option<String>,
    /// Page size in 1..=100; anything else becomes 10.
    #[param(value_type = Option<i64>, example = 10)]
    pub limit: Option<String>,
}

fn lenient_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse().ok())
}

/// Digits that do not even fit an `i64` are a client error; anything smaller
/// is left to the service, which reports out-of-range ids as missing.
fn parse_path_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| Error::invalid_request("Invalid user ID"))
}

/// List users, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users retrieved", body = SuccessEnvelope<UserListResponse>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security(("bearer" = []))
)]
#[get("")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<HttpResponse> {
    let page = lenient_int(query.page.as_deref());
    let limit = lenient_int(query.limit.as_deref());
    let listed = state.users.list_users(page, limit).await?;
    let pagination = PageInfo {
        total: listed.total,
        page: listed.page,
        limit: listed.limit,
    };
    let payload = UserListResponse {
        users: listed.users.into_iter().map(UserResponse::from).collect(),
        pagination: pagination.into(),
    };
    Ok(HttpResponse::Ok().json(SuccessEnvelope::with_data(
        "Users retrieved successfully",
        payload,
    )))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = SuccessEnvelope<UserResponse>),
        (status = 400, description = "Invalid payload or duplicate email", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security(("bearer" = []))
)]
#[post("")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users_command
        .create_user(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(SuccessEnvelope::with_data(
        "User created successfully",
        UserResponse::from(user),
    )))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User retrieved", body = SuccessEnvelope<UserResponse>),
        (status = 400, description = "Invalid user id", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security(("bearer" = []))
)]
#[get("/{id:[0-9]+}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_path_id(&path)?;
    let user = state.users.get_user(id).await?;
    Ok(HttpResponse::Ok().json(SuccessEnvelope::with_data(
        "User retrieved successfully",
        UserResponse::from(user),
    )))
}

/// Partially update a user.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = SuccessEnvelope<UserResponse>),
        (status = 400, description = "Invalid payload or duplicate email", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "updateUser",
    security(("bearer" = []))
)]
#[put("/{id:[0-9]+}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_path_id(&path)?;
    let user = state
        .users_command
        .update_user(id, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(SuccessEnvelope::with_data(
        "User updated successfully",
        UserResponse::from(user),
    )))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = SuccessEnvelope<UserResponse>),
        (status = 400, description = "Invalid user id", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "deleteUser",
    security(("bearer" = []))
)]
#[delete("/{id:[0-9]+}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_path_id(&path)?;
    state.users_command.delete_user(id).await?;
    Ok(HttpResponse::Ok().json(SuccessEnvelope::<UserResponse>::message_only(
        "User deleted successfully",
    )))
}

#[cfg(test)]
mod tests;
