//! Application error types and HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::types::FieldError;

pub type AppResult<T> = Result<T, AppError>;

/// Application error type covering all failure modes surfaced by the API
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Token tidak valid")]
    Unauthorized,

    #[error("Token tidak ditemukan")]
    MissingToken,

    #[error("{0}")]
    Forbidden(String),

    #[error("Email atau password salah")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        AppError::Forbidden(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal(message.into())
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        AppError::Validation(errors)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized
            | AppError::MissingToken
            | AppError::InvalidCredentials
            | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // Duplicates surface as plain client errors, same as validation
            AppError::Conflict(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to clients. Internal details are logged, never
    /// surfaced.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Internal(_) => {
                "Terjadi kesalahan pada server".to_string()
            }
            AppError::Jwt(_) => "Token tidak valid".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Database(e) => tracing::error!("Database error: {}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::Jwt(e) => tracing::debug!("JWT rejected: {}", e),
            _ => {}
        }

        let errors = match &self {
            AppError::Validation(errors) => Some(errors.clone()),
            _ => None,
        };

        let body = serde_json::json!({
            "success": false,
            "message": self.user_message(),
        });

        let body = match errors {
            Some(errors) => {
                let mut body = body;
                body["errors"] = serde_json::to_value(errors).unwrap_or_default();
                body
            }
            None => body,
        };

        (status, Json(body)).into_response()
    }
}

/// Shorthand for turning a missing row into a localized 404
pub trait OptionExt<T> {
    fn ok_or_not_found(self, message: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, message: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::forbidden("no").status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::not_found("Course tidak ditemukan").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("Email sudah terdaftar").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::internal("connection pool exhausted");
        assert_eq!(err.user_message(), "Terjadi kesalahan pada server");
    }

    #[test]
    fn test_not_found_message_passes_through() {
        let err = AppError::not_found("User tidak ditemukan");
        assert_eq!(err.user_message(), "User tidak ditemukan");
    }

    #[test]
    fn test_option_ext() {
        let missing: Option<i32> = None;
        let err = missing.ok_or_not_found("Course tidak ditemukan").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        assert_eq!(Some(7).ok_or_not_found("nope").unwrap(), 7);
    }
}
