//! HTTP request handlers.

pub mod auth_handler;
pub mod course_handler;
pub mod upload_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use course_handler::course_routes;
pub use upload_handler::upload_routes;
pub use user_handler::user_routes;
