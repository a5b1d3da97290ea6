//! User repository - persistence for the `users` table.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User, UserPatch};
use crate::errors::{AppError, AppResult};

/// User persistence operations.
///
/// Email uniqueness is enforced query-then-insert by the service layer;
/// the unique column constraint is a backstop only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Whether another row (different id) already uses this email
    async fn email_taken_by_other(&self, email: &str, id: i32) -> AppResult<bool>;

    /// All users, newest first
    async fn list(&self) -> AppResult<Vec<User>>;

    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Apply a partial update; returns `None` if the row no longer exists
    async fn update(&self, id: i32, patch: UserPatch) -> AppResult<Option<User>>;

    /// Replace the stored password value; returns `None` if the row is gone
    async fn set_password(&self, id: i32, password: String) -> AppResult<Option<User>>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed implementation of [`UserRepository`]
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn email_taken_by_other(&self, email: &str, id: i32) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::Id.ne(id))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            name: Set(new_user.name),
            email: Set(new_user.email),
            password: Set(new_user.password),
            phone: Set(new_user.phone),
            gender: Set(new_user.gender),
            role: Set(new_user.role.to_string()),
            avatar: Set(new_user.avatar),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(User::from(model))
    }

    async fn update(&self, id: i32, patch: UserPatch) -> AppResult<Option<User>> {
        let Some(existing) = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();

        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
        if let Some(phone) = patch.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(gender) = patch.gender {
            active.gender = Set(Some(gender));
        }
        if let Some(role) = patch.role {
            active.role = Set(role.to_string());
        }
        if let Some(avatar) = patch.avatar {
            active.avatar = Set(Some(avatar));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Some(User::from(model)))
    }

    async fn set_password(&self, id: i32, password: String) -> AppResult<Option<User>> {
        let Some(existing) = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.password = Set(password);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Some(User::from(model)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
