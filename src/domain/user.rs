//! User domain entity and related types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::{ROLE_ADMIN, ROLE_STUDENT, ROLE_USER};

/// Indonesian mobile number: +62 / 62 / 0 prefix followed by 8xx
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+62|62|0)8[0-9]{7,11}$").expect("valid phone regex"));

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    Student,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::User => ROLE_USER,
            UserRole::Student => ROLE_STUDENT,
        }
    }

    /// Parse a role string; unknown values are rejected
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            ROLE_ADMIN => Some(UserRole::Admin),
            ROLE_USER => Some(UserRole::User),
            ROLE_STUDENT => Some(UserRole::Student),
            _ => None,
        }
    }
}

impl From<&str> for UserRole {
    /// Lenient conversion used when reading from storage: anything
    /// unrecognized is treated as a regular user.
    fn from(s: &str) -> Self {
        UserRole::parse(s).unwrap_or(UserRole::User)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub role: UserRole,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Field set for inserting a new user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Already-hashed password
    pub password: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub role: UserRole,
    pub avatar: Option<String>,
}

/// Validated partial update applied by the repository; `None` leaves the
/// column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub role: Option<UserRole>,
    pub avatar: Option<String>,
}

/// User creation request (admin user management)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    /// Display name
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    #[schema(example = "Ann Smith")]
    pub name: String,
    /// Email address (must be unique)
    #[validate(email(message = "Please provide a valid email"))]
    #[schema(example = "ann@example.com")]
    pub email: String,
    /// Plain-text password (minimum 6 characters)
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    #[schema(example = "secret1", min_length = 6)]
    pub password: String,
    /// Indonesian mobile number
    #[validate(regex(
        path = *PHONE_REGEX,
        message = "Please provide a valid Indonesian phone number"
    ))]
    #[schema(example = "081234567890")]
    pub phone: Option<String>,
    /// Either "Laki-laki" or "Perempuan"
    #[schema(example = "Laki-laki")]
    pub gender: Option<String>,
    /// One of admin, user, student (defaults to student)
    #[schema(example = "student")]
    pub role: Option<String>,
    /// Avatar URL (randomized stock portrait when absent)
    pub avatar: Option<String>,
}

/// Partial user update: only supplied fields change
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    pub name: Option<String>,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: Option<String>,
    #[validate(regex(
        path = *PHONE_REGEX,
        message = "Please provide a valid Indonesian phone number"
    ))]
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub role: Option<String>,
    pub avatar: Option<String>,
}

impl UpdateUser {
    /// True when no recognized field is present; such updates are rejected
    /// before any write is issued.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.gender.is_none()
            && self.role.is_none()
            && self.avatar.is_none()
    }
}

/// Self-service registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    #[schema(example = "Ann Smith")]
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    #[schema(example = "ann@example.com")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    #[schema(example = "secret1", min_length = 6)]
    pub password: String,
    #[validate(regex(
        path = *PHONE_REGEX,
        message = "Please provide a valid Indonesian phone number"
    ))]
    #[schema(example = "081234567890")]
    pub phone: Option<String>,
    /// Either "Laki-laki" or "Perempuan"
    #[schema(example = "Laki-laki")]
    pub gender: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Please provide a valid email"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "123456")]
    pub password: String,
}

/// Admin-issued password reset
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ResetPassword {
    #[serde(rename = "newPassword")]
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    #[schema(example = "newsecret")]
    pub new_password: String,
}

/// Pick one of the stock portrait URLs for accounts created without an avatar
pub fn random_avatar_url() -> String {
    use crate::config::{AVATAR_CDN_BASE, AVATAR_POOL_SIZE};

    let n = (uuid::Uuid::new_v4().as_u128() % AVATAR_POOL_SIZE as u128) + 1;
    format!("{}/{}.jpg", AVATAR_CDN_BASE, n)
}

/// User response (safe to return to client, never carries the password)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Ann Smith")]
    pub name: String,
    #[schema(example = "ann@example.com")]
    pub email: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    #[schema(example = "student")]
    pub role: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            gender: user.gender,
            role: user.role.to_string(),
            avatar: user.avatar,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_round_trip() {
        for role in [UserRole::Admin, UserRole::User, UserRole::Student] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("superuser"), None);
    }

    #[test]
    fn test_unknown_stored_role_defaults_to_user() {
        assert_eq!(UserRole::from("moderator"), UserRole::User);
    }

    #[test]
    fn test_update_is_empty() {
        assert!(UpdateUser::default().is_empty());

        let update = UpdateUser {
            name: Some("Ann".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_phone_validation() {
        let valid = CreateUser {
            name: "Ann Smith".to_string(),
            email: "ann@example.com".to_string(),
            password: "secret1".to_string(),
            phone: Some("081234567890".to_string()),
            gender: None,
            role: None,
            avatar: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateUser {
            phone: Some("12345".to_string()),
            ..valid
        };
        assert!(invalid.validate().is_err());
    }
}
