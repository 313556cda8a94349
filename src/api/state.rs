//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AntiforgeryService, CourseService, DepartmentService, InstructorService, ReportService,
    ServiceContainer, Services, StudentService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub students: Arc<dyn StudentService>,
    pub courses: Arc<dyn CourseService>,
    pub instructors: Arc<dyn InstructorService>,
    pub departments: Arc<dyn DepartmentService>,
    /// Home page statistics
    pub reports: Arc<dyn ReportService>,
    pub antiforgery: Arc<dyn AntiforgeryService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_services(&container, database)
    }

    /// Create application state from any service container.
    ///
    /// Tests use this to swap individual services for mocks.
    pub fn from_services(services: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            students: services.students(),
            courses: services.courses(),
            instructors: services.instructors(),
            departments: services.departments(),
            reports: services.reports(),
            antiforgery: services.antiforgery(),
            database,
        }
    }
}
