//! Password value object.
//!
//! Encapsulates Argon2 hashing with a configurable work factor, plus the
//! legacy comparison path for rows whose password column still holds a
//! plain-text value from before hashing was introduced.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::{DEFAULT_HASH_TIME_COST, HASH_MEMORY_COST, MIN_PASSWORD_LENGTH};
use crate::errors::{AppError, AppResult};

/// Hashed (or legacy plain-text) password as stored in the database.
#[derive(Clone)]
pub struct Password {
    stored: String,
}

// Don't expose the stored value in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("stored", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain-text password with the given Argon2 time cost.
    ///
    /// # Errors
    /// Returns a validation error if the password is shorter than the
    /// minimum length.
    pub fn new(plain_text: &str, time_cost: u32) -> AppResult<Self> {
        if plain_text.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::hasher(time_cost)?
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;

        Ok(Self {
            stored: hash.to_string(),
        })
    }

    /// Wrap a value read from the database (hash or legacy plain text).
    pub fn from_stored(stored: String) -> Self {
        Self { stored }
    }

    /// Get the stored string for persistence.
    pub fn as_str(&self) -> &str {
        &self.stored
    }

    /// Consume and return the stored string.
    pub fn into_string(self) -> String {
        self.stored
    }

    /// Verify a plain-text password against the stored value.
    ///
    /// Values that look like an Argon2 PHC string are verified with Argon2;
    /// anything else is treated as a legacy plain-text password and compared
    /// directly.
    pub fn verify(&self, plain_text: &str) -> bool {
        if self.is_hashed() {
            self.verify_hash(plain_text)
        } else {
            self.stored == plain_text
        }
    }

    /// Whether the stored value is a PHC-format hash.
    pub fn is_hashed(&self) -> bool {
        self.stored.starts_with("$argon2")
    }

    fn verify_hash(&self, plain_text: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.stored) else {
            return false;
        };
        Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok()
    }

    fn hasher(time_cost: u32) -> AppResult<Argon2<'static>> {
        let params = Params::new(HASH_MEMORY_COST, time_cost, 1, None)
            .map_err(|e| AppError::internal(format!("Invalid Argon2 params: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = Password::new("secret1", DEFAULT_HASH_TIME_COST).unwrap();

        assert!(password.is_hashed());
        assert!(password.verify("secret1"));
        assert!(!password.verify("wrong-password"));
    }

    #[test]
    fn test_legacy_plaintext_comparison() {
        let password = Password::from_stored("oldpassword".to_string());

        assert!(!password.is_hashed());
        assert!(password.verify("oldpassword"));
        assert!(!password.verify("something-else"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let a = Password::new("samepass", DEFAULT_HASH_TIME_COST).unwrap();
        let b = Password::new("samepass", DEFAULT_HASH_TIME_COST).unwrap();

        assert_ne!(a.as_str(), b.as_str());
        assert!(a.verify("samepass"));
        assert!(b.verify("samepass"));
    }

    #[test]
    fn test_roundtrip_through_storage() {
        let hash = Password::new("secret1", DEFAULT_HASH_TIME_COST)
            .unwrap()
            .into_string();

        let restored = Password::from_stored(hash);
        assert!(restored.verify("secret1"));
    }

    #[test]
    fn test_password_too_short() {
        assert!(Password::new("12345", DEFAULT_HASH_TIME_COST).is_err());
        assert!(Password::new("123456", DEFAULT_HASH_TIME_COST).is_ok());
    }
}
