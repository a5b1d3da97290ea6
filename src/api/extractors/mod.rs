//! Custom axum extractors.

mod validated_json;

pub use validated_json::{collect_field_errors, ValidatedJson};
