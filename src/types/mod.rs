//! Shared types for DRY compliance.

mod pagination;
mod response;

pub use pagination::{ListParams, PageInfo};
pub use response::{ApiResponse, FieldError};
