//! User management handlers. All routes sit behind the JWT middleware.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CreateUser, ResetPassword, UpdateUser, UserResponse};
use crate::errors::AppResult;
use crate::types::ApiResponse;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/", post(create_user))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route("/:id", delete(delete_user))
        .route("/:id/reset-password", patch(reset_password))
}

/// List all users, newest first
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Users retrieved", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = state.user_service.list_users().await?;
    let count = users.len();

    Ok(Json(
        ApiResponse::success("Users retrieved successfully", users).with_count(count),
    ))
}

/// Get one user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User retrieved", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_user(id).await?;

    Ok(Json(ApiResponse::success(
        "User retrieved successfully",
        user,
    )))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failed or email already registered")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUser>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = state.user_service.create_user(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("User created successfully", user)),
    ))
}

/// Partially update a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Empty update or validation failed"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUser>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.update_user(id, payload).await?;

    Ok(Json(ApiResponse::success(
        "User updated successfully",
        user,
    )))
}

/// Delete a user; admin rows are protected
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 403, description = "Admin accounts cannot be deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.user_service.delete_user(id).await?;

    Ok(Json(ApiResponse::message("User deleted successfully")))
}

/// Replace a user's password
#[utoipa::path(
    patch,
    path = "/api/users/{id}/reset-password",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User id")),
    request_body = ResetPassword,
    responses(
        (status = 200, description = "Password reset", body = UserResponse),
        (status = 400, description = "Password too short"),
        (status = 404, description = "User not found")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<ResetPassword>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state
        .user_service
        .reset_password(id, payload.new_password)
        .await?;

    Ok(Json(ApiResponse::success(
        "Password reset successfully",
        user,
    )))
}
