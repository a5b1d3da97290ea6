//! User service - user management business logic.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, VALID_GENDERS, VALID_ROLES};
use crate::domain::{
    random_avatar_url, CreateUser, NewUser, Password, UpdateUser, UserPatch, UserResponse, UserRole,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::UserRepository;
use crate::types::FieldError;

/// User management operations (admin surface)
#[async_trait]
pub trait UserService: Send + Sync {
    /// All users, newest first
    async fn list_users(&self) -> AppResult<Vec<UserResponse>>;

    async fn get_user(&self, id: i32) -> AppResult<UserResponse>;

    async fn create_user(&self, request: CreateUser) -> AppResult<UserResponse>;

    /// Partial update; an update carrying no recognized field is rejected
    /// before any write
    async fn update_user(&self, id: i32, request: UpdateUser) -> AppResult<UserResponse>;

    /// Delete by id; rows with the admin role are protected
    async fn delete_user(&self, id: i32) -> AppResult<()>;

    /// Rehash and store a replacement password
    async fn reset_password(&self, id: i32, new_password: String) -> AppResult<UserResponse>;
}

fn validate_gender(gender: &str) -> AppResult<()> {
    if VALID_GENDERS.contains(&gender) {
        Ok(())
    } else {
        Err(AppError::validation(vec![FieldError::new(
            "gender",
            format!("Gender must be one of: {}", VALID_GENDERS.join(", ")),
        )]))
    }
}

fn parse_role(role: &str) -> AppResult<UserRole> {
    UserRole::parse(role).ok_or_else(|| {
        AppError::validation(vec![FieldError::new(
            "role",
            format!("Role must be one of: {}", VALID_ROLES.join(", ")),
        )])
    })
}

/// Concrete implementation of [`UserService`]
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    config: Config,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>, config: Config) -> Self {
        Self { users, config }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.users.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn get_user(&self, id: i32) -> AppResult<UserResponse> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_not_found("User tidak ditemukan")
            .map(UserResponse::from)
    }

    async fn create_user(&self, request: CreateUser) -> AppResult<UserResponse> {
        if let Some(gender) = &request.gender {
            validate_gender(gender)?;
        }
        let role = match &request.role {
            Some(role) => parse_role(role)?,
            None => UserRole::Student,
        };

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::conflict("Email sudah terdaftar"));
        }

        let password = Password::new(&request.password, self.config.hash_time_cost)?;

        let user = self
            .users
            .create(NewUser {
                name: request.name,
                email: request.email,
                password: password.into_string(),
                phone: request.phone,
                gender: request.gender,
                role,
                avatar: request.avatar.or_else(|| Some(random_avatar_url())),
            })
            .await?;

        tracing::info!(user_id = user.id, "User created");

        Ok(UserResponse::from(user))
    }

    async fn update_user(&self, id: i32, request: UpdateUser) -> AppResult<UserResponse> {
        if request.is_empty() {
            return Err(AppError::bad_request("Tidak ada data yang diupdate"));
        }

        if let Some(gender) = &request.gender {
            validate_gender(gender)?;
        }
        let role = match &request.role {
            Some(role) => Some(parse_role(role)?),
            None => None,
        };

        // Existence check first so a missing row reads as 404, not a
        // conflict on someone else's email
        self.users
            .find_by_id(id)
            .await?
            .ok_or_not_found("User tidak ditemukan")?;

        // Email moves require a uniqueness check against other rows
        if let Some(email) = &request.email {
            if self.users.email_taken_by_other(email, id).await? {
                return Err(AppError::conflict("Email sudah digunakan oleh user lain"));
            }
        }

        let patch = UserPatch {
            name: request.name,
            email: request.email,
            phone: request.phone,
            gender: request.gender,
            role,
            avatar: request.avatar,
        };

        self.users
            .update(id, patch)
            .await?
            .ok_or_not_found("User tidak ditemukan")
            .map(UserResponse::from)
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_not_found("User tidak ditemukan")?;

        if user.is_admin() {
            return Err(AppError::forbidden("Admin user tidak dapat dihapus"));
        }

        self.users.delete(id).await?;

        tracing::info!(user_id = id, "User deleted");

        Ok(())
    }

    async fn reset_password(&self, id: i32, new_password: String) -> AppResult<UserResponse> {
        let password = Password::new(&new_password, self.config.hash_time_cost)?;

        self.users
            .set_password(id, password.into_string())
            .await?
            .ok_or_not_found("User tidak ditemukan")
            .map(UserResponse::from)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::User;
    use crate::infra::repositories::MockUserRepository;

    fn sample_user(id: i32, role: UserRole) -> User {
        User {
            id,
            name: "Ann Smith".to_string(),
            email: "ann@example.com".to_string(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            phone: None,
            gender: None,
            role,
            avatar: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn manager(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo), Config::for_tests())
    }

    #[tokio::test]
    async fn delete_admin_is_forbidden_and_row_survives() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(sample_user(id, UserRole::Admin))));
        // No expect_delete: a delete call would panic the mock

        let err = manager(repo).delete_user(1).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(err.user_message(), "Admin user tidak dapat dihapus");
    }

    #[tokio::test]
    async fn delete_regular_user_succeeds() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(2))
            .returning(|id| Ok(Some(sample_user(id, UserRole::Student))));
        repo.expect_delete().with(eq(2)).returning(|_| Ok(()));

        manager(repo).delete_user(2).await.unwrap();
    }

    #[tokio::test]
    async fn empty_update_is_rejected_before_any_write() {
        // No expectations at all: any repository call panics the mock
        let repo = MockUserRepository::new();

        let err = manager(repo)
            .update_user(1, UpdateUser::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.user_message(), "Tidak ada data yang diupdate");
    }

    #[tokio::test]
    async fn create_with_taken_email_conflicts() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(sample_user(1, UserRole::User))));

        let request = CreateUser {
            name: "Ann Smith".to_string(),
            email: "ann@example.com".to_string(),
            password: "secret1".to_string(),
            phone: None,
            gender: None,
            role: None,
            avatar: None,
        };

        let err = manager(repo).create_user(request).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_rejects_unknown_role() {
        let repo = MockUserRepository::new();

        let request = CreateUser {
            name: "Ann Smith".to_string(),
            email: "ann@example.com".to_string(),
            password: "secret1".to_string(),
            phone: None,
            gender: None,
            role: Some("superuser".to_string()),
            avatar: None,
        };

        let err = manager(repo).create_user(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_hashes_password_and_defaults_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new_user| {
                new_user.password.starts_with("$argon2")
                    && new_user.role == UserRole::Student
                    && new_user.avatar.is_some()
            })
            .returning(|new_user| {
                Ok(User {
                    id: 1,
                    name: new_user.name,
                    email: new_user.email,
                    password: new_user.password,
                    phone: new_user.phone,
                    gender: new_user.gender,
                    role: new_user.role,
                    avatar: new_user.avatar,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let request = CreateUser {
            name: "Ann Smith".to_string(),
            email: "ann@example.com".to_string(),
            password: "secret1".to_string(),
            phone: None,
            gender: None,
            role: None,
            avatar: None,
        };

        let user = manager(repo).create_user(request).await.unwrap();
        assert_eq!(user.role, "student");
    }

    #[tokio::test]
    async fn reset_password_stores_a_hash() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_password()
            .withf(|id, password| *id == 1 && password.starts_with("$argon2"))
            .returning(|id, _| Ok(Some(sample_user(id, UserRole::User))));

        manager(repo)
            .reset_password(1, "newsecret".to_string())
            .await
            .unwrap();
    }
}
