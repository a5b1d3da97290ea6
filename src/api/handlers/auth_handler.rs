//! Authentication handlers.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::bearer_token;
use crate::api::AppState;
use crate::domain::{LoginRequest, RegisterUser, UserResponse};
use crate::errors::AppResult;
use crate::services::LoginResponse;
use crate::types::ApiResponse;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/verify", get(verify))
        .route("/verifikasi-email", get(verify_email))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let response = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(ApiResponse::success("Login successful", response)))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Registered", body = UserResponse),
        (status = 400, description = "Validation failed or email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterUser>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = state.auth_service.register(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Pendaftaran berhasil", user)),
    ))
}

/// Verify the bearer token and return the account it names
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token valid", body = UserResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let token = bearer_token(&headers)?;
    let user = state.auth_service.verify_user(token).await?;

    Ok(Json(ApiResponse::success("Token valid", user)))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct VerifyEmailParams {
    /// Purpose-scoped token from the verification email
    pub token: String,
}

/// Confirm an email address from the emailed verification link
#[utoipa::path(
    get,
    path = "/api/auth/verifikasi-email",
    tag = "Auth",
    params(VerifyEmailParams),
    responses(
        (status = 200, description = "Email verified", body = UserResponse),
        (status = 400, description = "Wrong token purpose"),
        (status = 401, description = "Invalid or expired token")
    )
)]
pub async fn verify_email(
    State(state): State<AppState>,
    Query(params): Query<VerifyEmailParams>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.auth_service.verify_email_token(&params.token).await?;

    Ok(Json(ApiResponse::success(
        "Email berhasil diverifikasi",
        user,
    )))
}
