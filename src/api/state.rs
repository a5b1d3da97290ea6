//! Application state - dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::db::Database;
use crate::infra::storage::DiskStorage;
use crate::services::{AuthService, CourseService, Services, UserService};

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub course_service: Arc<dyn CourseService>,
    pub storage: DiskStorage,
    pub database: Arc<Database>,
}

impl AppState {
    /// Build state with the full service graph wired from the database.
    pub fn from_config(database: Arc<Database>, config: Config) -> AppResult<Self> {
        let storage = DiskStorage::new(&config.upload_dir);
        let services = Services::from_connection(database.get_connection(), config)?;

        Ok(Self {
            auth_service: services.auth(),
            user_service: services.users(),
            course_service: services.courses(),
            storage,
            database,
        })
    }

    /// Build state with manually injected services (used by router tests).
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        course_service: Arc<dyn CourseService>,
        storage: DiskStorage,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            course_service,
            storage,
            database,
        }
    }
}
