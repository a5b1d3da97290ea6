//! Course domain entity, category enum, and list-query types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Closed set of catalog categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CourseCategory {
    Pemasaran,
    Desain,
    #[serde(rename = "Pengembangan Diri")]
    PengembanganDiri,
    Bisnis,
}

impl CourseCategory {
    pub const ALL: &'static [CourseCategory] = &[
        CourseCategory::Pemasaran,
        CourseCategory::Desain,
        CourseCategory::PengembanganDiri,
        CourseCategory::Bisnis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseCategory::Pemasaran => "Pemasaran",
            CourseCategory::Desain => "Desain",
            CourseCategory::PengembanganDiri => "Pengembangan Diri",
            CourseCategory::Bisnis => "Bisnis",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }

    /// Validation message listing the accepted values
    pub fn expected_values() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
        format!("Category must be one of: {}", names.join(", "))
    }
}

impl std::fmt::Display for CourseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Course catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Course {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Digital Marketing Strategy")]
    pub title: String,
    pub description: String,
    /// Course card image URL
    pub photos: Option<String>,
    #[schema(example = "Sarah Johnson")]
    pub mentor: String,
    #[schema(example = "Marketing Director")]
    pub rolementor: String,
    /// Mentor photo URL
    pub avatar: Option<String>,
    #[schema(example = "Tokopedia")]
    pub company: String,
    /// Average rating, 0-5
    #[schema(example = 4.2)]
    pub rating: f32,
    #[schema(example = 98)]
    pub review_count: i32,
    /// Free-form price label, e.g. "300K"
    #[schema(example = "300K")]
    pub price: String,
    pub category: CourseCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set for inserting a new course row
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub photos: Option<String>,
    pub mentor: String,
    pub rolementor: String,
    pub avatar: Option<String>,
    pub company: String,
    pub rating: f32,
    pub review_count: i32,
    pub price: String,
    pub category: CourseCategory,
}

/// Validated partial update applied by the repository; `None` leaves the
/// column untouched.
#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub photos: Option<String>,
    pub mentor: Option<String>,
    pub rolementor: Option<String>,
    pub avatar: Option<String>,
    pub company: Option<String>,
    pub rating: Option<f32>,
    pub review_count: Option<i32>,
    pub price: Option<String>,
    pub category: Option<CourseCategory>,
}

/// Course creation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourse {
    #[validate(length(min = 3, message = "Title must be at least 3 characters long"))]
    pub title: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters long"))]
    pub description: String,
    #[validate(url(message = "Photos must be a valid URL"))]
    pub photos: Option<String>,
    #[validate(length(min = 2, message = "Mentor name must be at least 2 characters long"))]
    pub mentor: String,
    #[validate(length(min = 2, message = "Mentor role must be at least 2 characters long"))]
    pub rolementor: String,
    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar: Option<String>,
    #[validate(length(min = 2, message = "Company name must be at least 2 characters long"))]
    pub company: String,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f32>,
    #[validate(range(min = 0, message = "Review count must be a non-negative integer"))]
    pub review_count: Option<i32>,
    #[validate(length(min = 1, message = "Price is required"))]
    pub price: String,
    /// Category name; must be one of the closed enum values
    pub category: String,
}

/// Partial course update: only supplied fields change
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourse {
    #[validate(length(min = 3, message = "Title must be at least 3 characters long"))]
    pub title: Option<String>,
    #[validate(length(min = 10, message = "Description must be at least 10 characters long"))]
    pub description: Option<String>,
    #[validate(url(message = "Photos must be a valid URL"))]
    pub photos: Option<String>,
    #[validate(length(min = 2, message = "Mentor name must be at least 2 characters long"))]
    pub mentor: Option<String>,
    #[validate(length(min = 2, message = "Mentor role must be at least 2 characters long"))]
    pub rolementor: Option<String>,
    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar: Option<String>,
    #[validate(length(min = 2, message = "Company name must be at least 2 characters long"))]
    pub company: Option<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f32>,
    #[validate(range(min = 0, message = "Review count must be a non-negative integer"))]
    pub review_count: Option<i32>,
    #[validate(length(min = 1, message = "Price is required"))]
    pub price: Option<String>,
    pub category: Option<String>,
}

impl UpdateCourse {
    /// True when no recognized field is present
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.photos.is_none()
            && self.mentor.is_none()
            && self.rolementor.is_none()
            && self.avatar.is_none()
            && self.company.is_none()
            && self.rating.is_none()
            && self.review_count.is_none()
            && self.price.is_none()
            && self.category.is_none()
    }
}

/// Sortable catalog columns (allow-list)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseSort {
    CreatedAt,
    Title,
    Price,
    Rating,
}

/// Sort direction; anything other than "ASC" means descending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(s) if s.eq_ignore_ascii_case("ASC") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

impl CourseSort {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "created_at" => Some(CourseSort::CreatedAt),
            "title" => Some(CourseSort::Title),
            "price" => Some(CourseSort::Price),
            "rating" => Some(CourseSort::Rating),
            _ => None,
        }
    }

    /// Resolve the `sortBy`/`sort` query parameters against the allow-list.
    ///
    /// An unrecognized column falls back to `created_at DESC` wholesale; the
    /// direction parameter is only honored for recognized columns.
    pub fn resolve(sort_by: Option<&str>, sort: Option<&str>) -> (CourseSort, SortDirection) {
        match sort_by {
            None => (CourseSort::CreatedAt, SortDirection::from_param(sort)),
            Some(column) => match CourseSort::parse(column) {
                Some(parsed) => (parsed, SortDirection::from_param(sort)),
                None => (CourseSort::CreatedAt, SortDirection::Desc),
            },
        }
    }
}

/// Resolved filter/sort/pagination inputs for a catalog listing
#[derive(Debug, Clone)]
pub struct CourseListQuery {
    pub category: Option<CourseCategory>,
    /// Substring match against the title
    pub search: Option<String>,
    pub sort_by: CourseSort,
    pub direction: SortDirection,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Default for CourseListQuery {
    fn default() -> Self {
        Self {
            category: None,
            search: None,
            sort_by: CourseSort::CreatedAt,
            direction: SortDirection::Desc,
            limit: None,
            offset: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(
            CourseCategory::parse("Pengembangan Diri"),
            Some(CourseCategory::PengembanganDiri)
        );
        assert_eq!(CourseCategory::parse("Memasak"), None);
    }

    #[test]
    fn test_sort_resolution_honors_allow_list() {
        assert_eq!(
            CourseSort::resolve(Some("price"), Some("ASC")),
            (CourseSort::Price, SortDirection::Asc)
        );
        assert_eq!(
            CourseSort::resolve(Some("rating"), None),
            (CourseSort::Rating, SortDirection::Desc)
        );
    }

    #[test]
    fn test_unrecognized_sort_column_falls_back_to_created_at_desc() {
        // Direction is ignored when the column is not in the allow-list
        assert_eq!(
            CourseSort::resolve(Some("password"), Some("ASC")),
            (CourseSort::CreatedAt, SortDirection::Desc)
        );
    }

    #[test]
    fn test_missing_sort_column_defaults() {
        assert_eq!(
            CourseSort::resolve(None, None),
            (CourseSort::CreatedAt, SortDirection::Desc)
        );
        assert_eq!(
            CourseSort::resolve(None, Some("asc")),
            (CourseSort::CreatedAt, SortDirection::Asc)
        );
    }

    #[test]
    fn test_update_is_empty() {
        assert!(UpdateCourse::default().is_empty());
        let update = UpdateCourse {
            price: Some("150K".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
