//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, course_handler, upload_handler, user_handler};
use crate::domain::{
    Course, CourseCategory, CreateCourse, CreateUser, LoginRequest, RegisterUser, ResetPassword,
    UpdateCourse, UpdateUser, UserResponse, UserRole,
};
use crate::services::LoginResponse;
use crate::types::{FieldError, PageInfo};

/// OpenAPI documentation for the Videobelajar API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Videobelajar API",
        version = "1.0.0",
        description = "Course catalog backend: authentication, user management, \
                       course CRUD, and file upload"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        auth_handler::register,
        auth_handler::verify,
        auth_handler::verify_email,
        course_handler::list_courses,
        course_handler::get_course,
        course_handler::courses_by_category,
        course_handler::create_course,
        course_handler::update_course,
        course_handler::delete_course,
        course_handler::reset_default_courses,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::reset_password,
        upload_handler::upload_file,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            CreateUser,
            UpdateUser,
            RegisterUser,
            LoginRequest,
            ResetPassword,
            LoginResponse,
            Course,
            CourseCategory,
            CreateCourse,
            UpdateCourse,
            FieldError,
            PageInfo,
            upload_handler::UploadResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login, registration, and token verification"),
        (name = "Courses", description = "Course catalog operations"),
        (name = "Users", description = "User management operations"),
        (name = "Upload", description = "File upload")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
