//! Service container - wires repositories into services.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{AuthService, Authenticator, CourseManager, CourseService, UserManager, UserService};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::repositories::{CourseStore, UserStore};
use crate::utils::Mailer;

/// Centralized access to all application services
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    course_service: Arc<dyn CourseService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        course_service: Arc<dyn CourseService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            course_service,
        }
    }

    /// Build the full service graph from a database connection and config
    pub fn from_connection(db: DatabaseConnection, config: Config) -> AppResult<Self> {
        let users = Arc::new(UserStore::new(db.clone()));
        let courses = Arc::new(CourseStore::new(db));
        let mailer = Mailer::from_config(&config.smtp)?;

        Ok(Self {
            auth_service: Arc::new(Authenticator::new(users.clone(), mailer, config.clone())),
            user_service: Arc::new(UserManager::new(users, config)),
            course_service: Arc::new(CourseManager::new(courses)),
        })
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    pub fn courses(&self) -> Arc<dyn CourseService> {
        self.course_service.clone()
    }
}
