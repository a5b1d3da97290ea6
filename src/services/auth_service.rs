//! Authentication service - login, registration, and token verification.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::Config;
use crate::domain::{
    random_avatar_url, NewUser, Password, RegisterUser, User, UserResponse, UserRole,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::UserRepository;
use crate::utils::Mailer;

/// Purpose marker embedded in email verification tokens so they cannot be
/// replayed as access tokens
const PURPOSE_EMAIL_VERIFY: &str = "email-verify";

/// JWT claims payload for access tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i32,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    /// Set on email verification tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

/// Successful login payload
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
}

/// Authentication operations
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate and return the user plus a signed token
    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse>;

    /// Register a new student account
    async fn register(&self, request: RegisterUser) -> AppResult<UserResponse>;

    /// Decode an access token, rejecting email verification tokens
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Decode an access token and re-fetch the user it names
    async fn verify_user(&self, token: &str) -> AppResult<UserResponse>;

    /// Validate a purpose-scoped email verification token
    async fn verify_email_token(&self, token: &str) -> AppResult<UserResponse>;
}

fn generate_token(user: &User, config: &Config, purpose: Option<String>) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
        purpose,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(token)
}

fn decode_token(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of [`AuthService`]
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    mailer: Mailer,
    config: Config,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, mailer: Mailer, config: Config) -> Self {
        Self {
            users,
            mailer,
            config,
        }
    }

    async fn send_verification_email(&self, user: &User) {
        let token = match generate_token(user, &self.config, Some(PURPOSE_EMAIL_VERIFY.into())) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Failed to build verification token: {}", e);
                return;
            }
        };

        let verify_url = format!(
            "{}/api/auth/verifikasi-email?token={}",
            self.config.app_url, token
        );

        // Best effort: a mail failure never fails registration
        if let Err(e) = self
            .mailer
            .send_verification_email(&user.email, &user.name, &verify_url)
            .await
        {
            tracing::warn!(email = %user.email, "Verification email failed: {}", e);
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse> {
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let stored = Password::from_stored(user.password.clone());
        if !stored.verify(&password) {
            return Err(AppError::InvalidCredentials);
        }

        let token = generate_token(&user, &self.config, None)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(LoginResponse {
            user: UserResponse::from(user),
            token,
        })
    }

    async fn register(&self, request: RegisterUser) -> AppResult<UserResponse> {
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::conflict(
                "Email sudah terdaftar. Silakan gunakan email lain.",
            ));
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
                role: UserRole::Student,
                avatar: Some(random_avatar_url()),
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");

        self.send_verification_email(&user).await;

        Ok(UserResponse::from(user))
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let claims = decode_token(token, &self.config)?;
        if claims.purpose.is_some() {
            return Err(AppError::Unauthorized);
        }
        Ok(claims)
    }

    async fn verify_user(&self, token: &str) -> AppResult<UserResponse> {
        let claims = self.verify_token(token)?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(UserResponse::from(user))
    }

    async fn verify_email_token(&self, token: &str) -> AppResult<UserResponse> {
        let claims = decode_token(token, &self.config)?;

        if claims.purpose.as_deref() != Some(PURPOSE_EMAIL_VERIFY) {
            return Err(AppError::bad_request("Token verifikasi tidak valid"));
        }

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_not_found("User tidak ditemukan")?;

        tracing::info!(user_id = user.id, "Email verified");

        Ok(UserResponse::from(user))
    }
}

/// Ensure the configured admin and demo accounts exist so their logins flow
/// through the normal database + hashing path.
pub async fn ensure_seed_accounts(users: &dyn UserRepository, config: &Config) -> AppResult<()> {
    let seeds = [
        (
            "Admin",
            config.seed_accounts.admin_email.as_str(),
            config.seed_accounts.admin_password.as_str(),
            UserRole::Admin,
        ),
        (
            "Demo User",
            config.seed_accounts.demo_email.as_str(),
            config.seed_accounts.demo_password.as_str(),
            UserRole::User,
        ),
    ];

    for (name, email, plain, role) in seeds {
        if users.find_by_email(email).await?.is_some() {
            continue;
        }

        let password = Password::new(plain, config.hash_time_cost)?;
        let user = users
            .create(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password: password.into_string(),
                phone: None,
                gender: None,
                role,
                avatar: Some(random_avatar_url()),
            })
            .await?;

        tracing::info!(user_id = user.id, email = %email, role = %role, "Seed account created");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::config::SmtpConfig;
    use crate::domain::UserRole;
    use crate::infra::repositories::MockUserRepository;

    fn stored_user(id: i32, email: &str, password: &str) -> User {
        User {
            id,
            name: "Demo User".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: None,
            gender: None,
            role: UserRole::User,
            avatar: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn authenticator(repo: MockUserRepository) -> Authenticator {
        let config = Config::for_tests();
        let mailer = Mailer::from_config(&SmtpConfig::default()).unwrap();
        Authenticator::new(Arc::new(repo), mailer, config)
    }

    #[tokio::test]
    async fn login_with_hashed_password_succeeds_and_token_verifies() {
        let config = Config::for_tests();
        let hash = Password::new("secret1", config.hash_time_cost)
            .unwrap()
            .into_string();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |email| Ok(Some(stored_user(7, email, &hash))));

        let auth = authenticator(repo);
        let response = auth
            .login("user@example.com".to_string(), "secret1".to_string())
            .await
            .unwrap();

        assert_eq!(response.user.id, 7);
        assert!(response.user.email.contains('@'));

        let claims = auth.verify_token(&response.token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, "user");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn login_with_legacy_plaintext_password_succeeds() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(1, email, "123456"))));

        let auth = authenticator(repo);
        let response = auth
            .login("user@example.com".to_string(), "123456".to_string())
            .await
            .unwrap();

        assert!(!response.token.is_empty());
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(1, email, "123456"))));

        let auth = authenticator(repo);
        let err = auth
            .login("user@example.com".to_string(), "wrong".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
        assert_eq!(err.user_message(), "Email atau password salah");
    }

    #[tokio::test]
    async fn login_with_unknown_email_is_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let auth = authenticator(repo);
        let err = auth
            .login("nobody@example.com".to_string(), "secret1".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn register_with_taken_email_conflicts() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(1, email, "123456"))));

        let auth = authenticator(repo);
        let err = auth
            .register(RegisterUser {
                name: "Ann Smith".to_string(),
                email: "ann@example.com".to_string(),
                password: "secret1".to_string(),
                phone: None,
                gender: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn register_assigns_student_role_and_stock_avatar() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new_user| {
                new_user.role == UserRole::Student
                    && new_user.password.starts_with("$argon2")
                    && new_user
                        .avatar
                        .as_deref()
                        .is_some_and(|url| url.starts_with("https://cdn.jsdelivr.net/"))
            })
            .returning(|new_user| {
                Ok(User {
                    id: 3,
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

        let auth = authenticator(repo);
        let user = auth
            .register(RegisterUser {
                name: "Ann Smith".to_string(),
                email: "ann@example.com".to_string(),
                password: "secret1".to_string(),
                phone: None,
                gender: None,
            })
            .await
            .unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.role, "student");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let repo = MockUserRepository::new();
        let auth = authenticator(repo);

        assert!(auth.verify_token("not-a-jwt").is_err());
    }
}
