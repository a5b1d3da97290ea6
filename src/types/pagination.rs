//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Optional limit/offset query parameters for list endpoints.
///
/// Both are optional: when `limit` is absent the full result set is
/// returned, matching the behavior of unfiltered catalog reads.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
pub struct ListParams {
    /// Maximum number of rows to return (1-100)
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u64>,
    /// Number of rows to skip
    pub offset: Option<u64>,
}

/// Pagination metadata returned alongside list data
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageInfo {
    /// Total rows matching the filter, ignoring limit/offset
    pub total: u64,
    /// Rows in this response
    pub count: usize,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl PageInfo {
    pub fn new(total: u64, count: usize, params: &ListParams) -> Self {
        Self {
            total,
            count,
            limit: params.limit,
            offset: params.offset,
        }
    }
}
