//! Course service - catalog business logic.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    Course, CourseCategory, CourseListQuery, CoursePatch, CourseSort, CreateCourse, NewCourse,
    UpdateCourse,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::CourseRepository;
use crate::types::FieldError;

/// Raw catalog listing parameters as received from the query string
#[derive(Debug, Clone, Default)]
pub struct CourseListRequest {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Course catalog operations
#[async_trait]
pub trait CourseService: Send + Sync {
    /// Filtered, sorted, paginated listing plus the total matching count
    async fn list_courses(&self, request: CourseListRequest) -> AppResult<(Vec<Course>, u64)>;

    async fn get_course(&self, id: i32) -> AppResult<Course>;

    /// All courses in one category, newest first
    async fn courses_by_category(&self, category: &str) -> AppResult<Vec<Course>>;

    async fn create_course(&self, request: CreateCourse) -> AppResult<Course>;

    /// Partial update; an update carrying no recognized field is rejected
    /// before any write
    async fn update_course(&self, id: i32, request: UpdateCourse) -> AppResult<Course>;

    async fn delete_course(&self, id: i32) -> AppResult<()>;

    /// Wipe the catalog and reseed it with the three default courses
    async fn reset_default_courses(&self) -> AppResult<Vec<Course>>;
}

fn parse_category(category: &str) -> AppResult<CourseCategory> {
    CourseCategory::parse(category).ok_or_else(|| {
        AppError::validation(vec![FieldError::new(
            "category",
            CourseCategory::expected_values(),
        )])
    })
}

/// The fixed catalog contents restored by a reset
pub fn default_courses() -> Vec<NewCourse> {
    vec![
        NewCourse {
            title: "Big 4 Auditor Financial Analyst".to_string(),
            description: "Mulai transformasi dengan instruktur profesional, harga yang \
                          terjangkau, dan sistem pembelajaran yang mudah dipahami."
                .to_string(),
            photos: Some("/images/cards/card1.png".to_string()),
            mentor: "Jenna Ortega".to_string(),
            rolementor: "Senior Accountant".to_string(),
            avatar: Some("/images/tutors/tutor-card1.png".to_string()),
            company: "Gojek".to_string(),
            rating: 4.5,
            review_count: 126,
            price: "300K".to_string(),
            category: CourseCategory::Bisnis,
        },
        NewCourse {
            title: "Digital Marketing Strategy".to_string(),
            description: "Pelajari strategi pemasaran digital yang efektif untuk meningkatkan \
                          brand awareness dan konversi."
                .to_string(),
            photos: Some("/images/cards/card2.png".to_string()),
            mentor: "Sarah Johnson".to_string(),
            rolementor: "Marketing Director".to_string(),
            avatar: Some("/images/tutors/tutor-card2.png".to_string()),
            company: "Tokopedia".to_string(),
            rating: 4.2,
            review_count: 98,
            price: "250K".to_string(),
            category: CourseCategory::Pemasaran,
        },
        NewCourse {
            title: "UI/UX Design Fundamentals".to_string(),
            description: "Kuasai dasar-dasar desain UI/UX untuk menciptakan pengalaman pengguna \
                          yang luar biasa."
                .to_string(),
            photos: Some("/images/cards/card3.png".to_string()),
            mentor: "Michael Chen".to_string(),
            rolementor: "Lead Designer".to_string(),
            avatar: Some("/images/tutors/tutor-card3.png".to_string()),
            company: "Grab".to_string(),
            rating: 4.7,
            review_count: 204,
            price: "400K".to_string(),
            category: CourseCategory::Desain,
        },
    ]
}

/// Concrete implementation of [`CourseService`]
pub struct CourseManager {
    courses: Arc<dyn CourseRepository>,
}

impl CourseManager {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }
}

#[async_trait]
impl CourseService for CourseManager {
    async fn list_courses(&self, request: CourseListRequest) -> AppResult<(Vec<Course>, u64)> {
        let category = match &request.category {
            Some(category) => Some(parse_category(category)?),
            None => None,
        };

        let (sort_by, direction) =
            CourseSort::resolve(request.sort_by.as_deref(), request.sort.as_deref());

        let query = CourseListQuery {
            category,
            search: request.search,
            sort_by,
            direction,
            limit: request.limit,
            offset: request.offset,
        };

        self.courses.list(query).await
    }

    async fn get_course(&self, id: i32) -> AppResult<Course> {
        self.courses
            .find_by_id(id)
            .await?
            .ok_or_not_found("Course tidak ditemukan")
    }

    async fn courses_by_category(&self, category: &str) -> AppResult<Vec<Course>> {
        let category = parse_category(category)?;
        self.courses.list_by_category(category).await
    }

    async fn create_course(&self, request: CreateCourse) -> AppResult<Course> {
        let category = parse_category(&request.category)?;

        let course = self
            .courses
            .create(NewCourse {
                title: request.title,
                description: request.description,
                photos: request.photos,
                mentor: request.mentor,
                rolementor: request.rolementor,
                avatar: request.avatar,
                company: request.company,
                rating: request.rating.unwrap_or(0.0),
                review_count: request.review_count.unwrap_or(0),
                price: request.price,
                category,
            })
            .await?;

        tracing::info!(course_id = course.id, "Course created");

        Ok(course)
    }

    async fn update_course(&self, id: i32, request: UpdateCourse) -> AppResult<Course> {
        if request.is_empty() {
            return Err(AppError::bad_request("Tidak ada data yang diupdate"));
        }

        let category = match &request.category {
            Some(category) => Some(parse_category(category)?),
            None => None,
        };

        let patch = CoursePatch {
            title: request.title,
            description: request.description,
            photos: request.photos,
            mentor: request.mentor,
            rolementor: request.rolementor,
            avatar: request.avatar,
            company: request.company,
            rating: request.rating,
            review_count: request.review_count,
            price: request.price,
            category,
        };

        self.courses
            .update(id, patch)
            .await?
            .ok_or_not_found("Course tidak ditemukan")
    }

    async fn delete_course(&self, id: i32) -> AppResult<()> {
        self.courses
            .find_by_id(id)
            .await?
            .ok_or_not_found("Course tidak ditemukan")?;

        self.courses.delete(id).await?;

        tracing::info!(course_id = id, "Course deleted");

        Ok(())
    }

    async fn reset_default_courses(&self) -> AppResult<Vec<Course>> {
        let courses = self.courses.reset(default_courses()).await?;

        tracing::info!(count = courses.len(), "Catalog reset to default courses");

        Ok(courses)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::SortDirection;
    use crate::infra::repositories::MockCourseRepository;

    fn sample_course(id: i32) -> Course {
        Course {
            id,
            title: "Digital Marketing Strategy".to_string(),
            description: "Pelajari strategi pemasaran digital yang efektif.".to_string(),
            photos: None,
            mentor: "Sarah Johnson".to_string(),
            rolementor: "Marketing Director".to_string(),
            avatar: None,
            company: "Tokopedia".to_string(),
            rating: 4.2,
            review_count: 98,
            price: "250K".to_string(),
            category: CourseCategory::Pemasaran,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn unknown_sort_column_reaches_repository_as_created_at_desc() {
        let mut repo = MockCourseRepository::new();
        repo.expect_list()
            .withf(|query| {
                query.sort_by == CourseSort::CreatedAt && query.direction == SortDirection::Desc
            })
            .returning(|_| Ok((vec![], 0)));

        let service = CourseManager::new(Arc::new(repo));
        let request = CourseListRequest {
            sort_by: Some("password".to_string()),
            sort: Some("ASC".to_string()),
            ..Default::default()
        };

        service.list_courses(request).await.unwrap();
    }

    #[tokio::test]
    async fn unfiltered_list_defaults_to_created_at_desc() {
        let mut repo = MockCourseRepository::new();
        repo.expect_list()
            .withf(|query| {
                query.sort_by == CourseSort::CreatedAt
                    && query.direction == SortDirection::Desc
                    && query.category.is_none()
                    && query.search.is_none()
            })
            .returning(|_| Ok((vec![sample_course(1)], 1)));

        let service = CourseManager::new(Arc::new(repo));
        let (courses, total) = service
            .list_courses(CourseListRequest::default())
            .await
            .unwrap();

        assert_eq!(courses.len(), 1);
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn list_rejects_unknown_category() {
        let repo = MockCourseRepository::new();
        let service = CourseManager::new(Arc::new(repo));

        let request = CourseListRequest {
            category: Some("Memasak".to_string()),
            ..Default::default()
        };

        let err = service.list_courses(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn empty_update_is_rejected_before_any_write() {
        let repo = MockCourseRepository::new();
        let service = CourseManager::new(Arc::new(repo));

        let err = service
            .update_course(1, UpdateCourse::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.user_message(), "Tidak ada data yang diupdate");
    }

    #[tokio::test]
    async fn delete_missing_course_is_not_found() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_id().with(eq(42)).returning(|_| Ok(None));

        let service = CourseManager::new(Arc::new(repo));
        let err = service.delete_course(42).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.user_message(), "Course tidak ditemukan");
    }

    #[tokio::test]
    async fn reset_seeds_the_three_default_courses() {
        let mut repo = MockCourseRepository::new();
        repo.expect_reset()
            .withf(|seeds| {
                seeds.len() == 3
                    && seeds[0].title == "Big 4 Auditor Financial Analyst"
                    && seeds[1].title == "Digital Marketing Strategy"
                    && seeds[2].title == "UI/UX Design Fundamentals"
            })
            .returning(|seeds| {
                Ok(seeds
                    .into_iter()
                    .enumerate()
                    .map(|(i, seed)| Course {
                        id: i as i32 + 1,
                        title: seed.title,
                        description: seed.description,
                        photos: seed.photos,
                        mentor: seed.mentor,
                        rolementor: seed.rolementor,
                        avatar: seed.avatar,
                        company: seed.company,
                        rating: seed.rating,
                        review_count: seed.review_count,
                        price: seed.price,
                        category: seed.category,
                        created_at: Utc::now(),
                        updated_at: Utc::now(),
                    })
                    .collect())
            });

        let service = CourseManager::new(Arc::new(repo));
        let courses = service.reset_default_courses().await.unwrap();

        let ids: Vec<i32> = courses.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn create_rejects_unknown_category() {
        let repo = MockCourseRepository::new();
        let service = CourseManager::new(Arc::new(repo));

        let request = CreateCourse {
            title: "Cooking 101".to_string(),
            description: "Belajar memasak dari dasar sampai mahir.".to_string(),
            photos: None,
            mentor: "Chef Juna".to_string(),
            rolementor: "Head Chef".to_string(),
            avatar: None,
            company: "Warung".to_string(),
            rating: None,
            review_count: None,
            price: "100K".to_string(),
            category: "Memasak".to_string(),
        };

        let err = service.create_course(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
