//! Course catalog handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::api::extractors::{collect_field_errors, ValidatedJson};
use crate::api::AppState;
use crate::domain::{Course, CreateCourse, UpdateCourse};
use crate::errors::{AppError, AppResult};
use crate::services::CourseListRequest;
use crate::types::{ApiResponse, ListParams, PageInfo};

pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses))
        .route("/", post(create_course))
        .route("/category/:category", get(courses_by_category))
        .route("/reset-default", post(reset_default_courses))
        .route("/:id", get(get_course))
        .route("/:id", put(update_course))
        .route("/:id", delete(delete_course))
}

/// Catalog listing query string
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
pub struct CourseListParams {
    /// Filter by category name
    pub category: Option<String>,
    /// Title substring filter
    pub search: Option<String>,
    /// Sort column: created_at, title, price, rating
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    /// "ASC" for ascending; anything else sorts descending
    pub sort: Option<String>,
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// List courses with filtering, sorting, and pagination
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "Courses",
    params(CourseListParams),
    responses(
        (status = 200, description = "Courses retrieved", body = [Course]),
        (status = 400, description = "Invalid category or limit")
    )
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseListParams>,
) -> AppResult<Json<ApiResponse<Vec<Course>>>> {
    params
        .validate()
        .map_err(|e| AppError::validation(collect_field_errors(&e)))?;

    let page = ListParams {
        limit: params.limit,
        offset: params.offset,
    };

    let (courses, total) = state
        .course_service
        .list_courses(CourseListRequest {
            category: params.category,
            search: params.search,
            sort_by: params.sort_by,
            sort: params.sort,
            limit: params.limit,
            offset: params.offset,
        })
        .await?;

    let pagination = PageInfo::new(total, courses.len(), &page);

    Ok(Json(
        ApiResponse::success("Courses retrieved successfully", courses)
            .with_pagination(pagination),
    ))
}

/// Get one course by id
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course retrieved", body = Course),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Course>>> {
    let course = state.course_service.get_course(id).await?;

    Ok(Json(ApiResponse::success(
        "Course retrieved successfully",
        course,
    )))
}

/// List all courses in one category, newest first
#[utoipa::path(
    get,
    path = "/api/courses/category/{category}",
    tag = "Courses",
    params(("category" = String, Path, description = "Category name")),
    responses(
        (status = 200, description = "Courses retrieved", body = [Course]),
        (status = 400, description = "Unknown category")
    )
)]
pub async fn courses_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Course>>>> {
    let courses = state.course_service.courses_by_category(&category).await?;
    let count = courses.len();

    Ok(Json(
        ApiResponse::success(
            format!("Courses in category '{}' retrieved successfully", category),
            courses,
        )
        .with_count(count),
    ))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    tag = "Courses",
    request_body = CreateCourse,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCourse>,
) -> AppResult<(StatusCode, Json<ApiResponse<Course>>)> {
    let course = state.course_service.create_course(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Course created successfully", course)),
    ))
}

/// Partially update a course
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course id")),
    request_body = UpdateCourse,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Empty update or validation failed"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCourse>,
) -> AppResult<Json<ApiResponse<Course>>> {
    let course = state.course_service.update_course(id, payload).await?;

    Ok(Json(ApiResponse::success(
        "Course updated successfully",
        course,
    )))
}

/// Delete a course
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course deleted"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.course_service.delete_course(id).await?;

    Ok(Json(ApiResponse::message("Course deleted successfully")))
}

/// Wipe the catalog and restore the three default courses
#[utoipa::path(
    post,
    path = "/api/courses/reset-default",
    tag = "Courses",
    responses(
        (status = 200, description = "Catalog reset", body = [Course])
    )
)]
pub async fn reset_default_courses(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Course>>>> {
    let courses = state.course_service.reset_default_courses().await?;
    let count = courses.len();

    Ok(Json(
        ApiResponse::success("Courses reset to default successfully", courses).with_count(count),
    ))
}
