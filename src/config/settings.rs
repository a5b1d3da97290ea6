//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_APP_URL, DEFAULT_DATABASE_URL, DEFAULT_HASH_TIME_COST, DEFAULT_JWT_EXPIRATION_HOURS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_UPLOAD_DIR, MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub hash_time_cost: u32,
    pub server_host: String,
    pub server_port: u16,
    pub upload_dir: String,
    pub app_url: String,
    pub smtp: SmtpConfig,
    pub seed_accounts: SeedAccounts,
}

/// Mail server credentials; `host == None` means emails are logged, not sent
#[derive(Clone, Default)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub from: String,
}

/// Built-in accounts ensured at startup so demo logins flow through the
/// normal database + hashing path
#[derive(Clone)]
pub struct SeedAccounts {
    pub admin_email: String,
    pub admin_password: String,
    pub demo_email: String,
    pub demo_password: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("hash_time_cost", &self.hash_time_cost)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("upload_dir", &self.upload_dir)
            .field("app_url", &self.app_url)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                // Production mode: panic
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        // Validate JWT secret length
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        Self {
            database_url: database_url_from_env(),
            jwt_secret,
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            hash_time_cost: env::var("HASH_TIME_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HASH_TIME_COST),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()),
            app_url: env::var("APP_URL").unwrap_or_else(|_| DEFAULT_APP_URL.to_string()),
            smtp: SmtpConfig::from_env(),
            seed_accounts: SeedAccounts::from_env(),
        }
    }

    /// Fixed configuration for unit tests, independent of the environment.
    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: "test-secret-key-for-testing-only-32chars".to_string(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            hash_time_cost: DEFAULT_HASH_TIME_COST,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            upload_dir: DEFAULT_UPLOAD_DIR.to_string(),
            app_url: DEFAULT_APP_URL.to_string(),
            smtp: SmtpConfig::default(),
            seed_accounts: SeedAccounts::from_env(),
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Prefer DATABASE_URL; otherwise assemble the URL from the discrete
/// DB_HOST / DB_PORT / DB_USER / DB_PASS / DB_NAME variables.
fn database_url_from_env() -> String {
    if let Ok(url) = env::var("DATABASE_URL") {
        return url;
    }

    match env::var("DB_HOST") {
        Ok(host) => {
            let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
            let user = env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string());
            let pass = env::var("DB_PASS").unwrap_or_default();
            let name = env::var("DB_NAME").unwrap_or_else(|_| "videobelajar_db".to_string());
            format!("postgres://{user}:{pass}@{host}:{port}/{name}")
        }
        Err(_) => DEFAULT_DATABASE_URL.to_string(),
    }
}

impl SmtpConfig {
    fn from_env() -> Self {
        Self {
            host: env::var("SMTP_HOST").ok(),
            port: env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            user: env::var("SMTP_USER").ok(),
            pass: env::var("SMTP_PASS").ok(),
            from: env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@videobelajar.com".to_string()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.host.is_some()
    }
}

impl SeedAccounts {
    fn from_env() -> Self {
        Self {
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@videobelajar.com".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
            demo_email: env::var("DEMO_EMAIL").unwrap_or_else(|_| "user@example.com".to_string()),
            demo_password: env::var("DEMO_PASSWORD").unwrap_or_else(|_| "123456".to_string()),
        }
    }
}
