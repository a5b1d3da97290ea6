//! Service layer - business logic behind the HTTP handlers.
//!
//! Services depend on repository traits, not concrete stores, so unit
//! tests can substitute mocks.

mod auth_service;
mod container;
mod course_service;
mod user_service;

pub use auth_service::{ensure_seed_accounts, AuthService, Authenticator, Claims, LoginResponse};
pub use container::Services;
pub use course_service::{
    default_courses, CourseListRequest, CourseManager, CourseService,
};
pub use user_service::{UserManager, UserService};
