//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod course_repository;
mod user_repository;

pub use course_repository::{CourseRepository, CourseStore};
pub use user_repository::{UserRepository, UserStore};

// Generated mocks for service unit tests
#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
