//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod course;
pub mod password;
pub mod user;

pub use course::{
    Course, CourseCategory, CourseListQuery, CoursePatch, CourseSort, CreateCourse, NewCourse,
    SortDirection, UpdateCourse,
};
pub use password::Password;
pub use user::{
    random_avatar_url, CreateUser, LoginRequest, NewUser, RegisterUser, ResetPassword, UpdateUser,
    User, UserPatch, UserResponse, UserRole,
};
