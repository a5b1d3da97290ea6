use serde::Serialize;
use utoipa::ToSchema;

use crate::types::PageInfo;

/// Single validation failure, surfaced in the error envelope
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldError {
    /// Name of the offending request field
    #[schema(example = "email")]
    pub field: String,
    /// Human-readable description of the failure
    #[schema(example = "Please provide a valid email")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Standard API response wrapper: `{success, message, data?, errors?, pagination?, count?}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
            pagination: None,
            count: None,
        }
    }

    /// Attach pagination metadata to a list response
    pub fn with_pagination(mut self, pagination: PageInfo) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Attach a bare item count to a list response
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl ApiResponse<()> {
    /// Message-only envelope (delete confirmations and the like)
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            errors: None,
            pagination: None,
            count: None,
        }
    }
}
