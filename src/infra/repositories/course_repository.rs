//! Course repository - persistence for the `courses` table.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, Statement,
};

use super::entities::course::{self, ActiveModel, Entity as CourseEntity};
use crate::domain::{
    Course, CourseCategory, CourseListQuery, CoursePatch, CourseSort, NewCourse, SortDirection,
};
use crate::errors::{AppError, AppResult};

/// Course persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Filtered, sorted, paginated listing plus the total row count for the
    /// same filter (ignoring limit/offset)
    async fn list(&self, query: CourseListQuery) -> AppResult<(Vec<Course>, u64)>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Course>>;

    /// All courses in a category, newest first
    async fn list_by_category(&self, category: CourseCategory) -> AppResult<Vec<Course>>;

    async fn create(&self, new_course: NewCourse) -> AppResult<Course>;

    /// Apply a partial update; returns `None` if the row no longer exists
    async fn update(&self, id: i32, patch: CoursePatch) -> AppResult<Option<Course>>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Wipe the table, restart the id sequence at 1, and insert the seed rows
    async fn reset(&self, seeds: Vec<NewCourse>) -> AppResult<Vec<Course>>;
}

fn sort_column(sort: CourseSort) -> course::Column {
    match sort {
        CourseSort::CreatedAt => course::Column::CreatedAt,
        CourseSort::Title => course::Column::Title,
        CourseSort::Price => course::Column::Price,
        CourseSort::Rating => course::Column::Rating,
    }
}

fn sort_order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

fn active_model_from_new(new_course: NewCourse) -> ActiveModel {
    let now = Utc::now();
    ActiveModel {
        title: Set(new_course.title),
        description: Set(new_course.description),
        photos: Set(new_course.photos),
        mentor: Set(new_course.mentor),
        rolementor: Set(new_course.rolementor),
        avatar: Set(new_course.avatar),
        company: Set(new_course.company),
        rating: Set(new_course.rating),
        review_count: Set(new_course.review_count),
        price: Set(new_course.price),
        category: Set(new_course.category.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}

/// SeaORM-backed implementation of [`CourseRepository`]
pub struct CourseStore {
    db: DatabaseConnection,
}

impl CourseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for CourseStore {
    async fn list(&self, query: CourseListQuery) -> AppResult<(Vec<Course>, u64)> {
        let mut select = CourseEntity::find();

        if let Some(category) = query.category {
            select = select.filter(course::Column::Category.eq(category.as_str()));
        }
        if let Some(search) = &query.search {
            select = select.filter(course::Column::Title.contains(search));
        }

        // Count query runs against the same filter, without limit/offset
        let total = select
            .clone()
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        let mut select =
            select.order_by(sort_column(query.sort_by), sort_order(query.direction));

        if let Some(limit) = query.limit {
            select = select.limit(limit);
            if let Some(offset) = query.offset {
                select = select.offset(offset);
            }
        }

        let models = select.all(&self.db).await.map_err(AppError::from)?;
        Ok((models.into_iter().map(Course::from).collect(), total))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Course>> {
        let result = CourseEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Course::from))
    }

    async fn list_by_category(&self, category: CourseCategory) -> AppResult<Vec<Course>> {
        let models = CourseEntity::find()
            .filter(course::Column::Category.eq(category.as_str()))
            .order_by_desc(course::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Course::from).collect())
    }

    async fn create(&self, new_course: NewCourse) -> AppResult<Course> {
        let model = active_model_from_new(new_course)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Course::from(model))
    }

    async fn update(&self, id: i32, patch: CoursePatch) -> AppResult<Option<Course>> {
        let Some(existing) = CourseEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();

        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(photos) = patch.photos {
            active.photos = Set(Some(photos));
        }
        if let Some(mentor) = patch.mentor {
            active.mentor = Set(mentor);
        }
        if let Some(rolementor) = patch.rolementor {
            active.rolementor = Set(rolementor);
        }
        if let Some(avatar) = patch.avatar {
            active.avatar = Set(Some(avatar));
        }
        if let Some(company) = patch.company {
            active.company = Set(company);
        }
        if let Some(rating) = patch.rating {
            active.rating = Set(rating);
        }
        if let Some(review_count) = patch.review_count {
            active.review_count = Set(review_count);
        }
        if let Some(price) = patch.price {
            active.price = Set(price);
        }
        if let Some(category) = patch.category {
            active.category = Set(category.to_string());
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Some(Course::from(model)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        CourseEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn reset(&self, seeds: Vec<NewCourse>) -> AppResult<Vec<Course>> {
        // TRUNCATE ... RESTART IDENTITY guarantees the reseeded rows get
        // ids 1..=N regardless of prior inserts
        let backend = self.db.get_database_backend();
        self.db
            .execute(Statement::from_string(
                backend,
                "TRUNCATE TABLE courses RESTART IDENTITY".to_string(),
            ))
            .await
            .map_err(AppError::from)?;

        let mut created = Vec::with_capacity(seeds.len());
        for seed in seeds {
            let model = active_model_from_new(seed)
                .insert(&self.db)
                .await
                .map_err(AppError::from)?;
            created.push(Course::from(model));
        }

        Ok(created)
    }
}
