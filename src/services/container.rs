//! Service Container - Centralized service access with parallel execution support.
//!
//! Features:
//! - Centralized access to all application services
//! - Thread-safe concurrent access via Arc
//! - Parallel execution utilities for independent reads

use std::future::Future;
use std::sync::Arc;

use super::{
    Antiforgery, AntiforgeryService, CourseManager, CourseService, DepartmentManager,
    DepartmentService, InstructorManager, InstructorService, ReportManager, ReportService,
    StudentManager, StudentService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
pub trait ServiceContainer: Send + Sync {
    fn students(&self) -> Arc<dyn StudentService>;

    fn courses(&self) -> Arc<dyn CourseService>;

    fn instructors(&self) -> Arc<dyn InstructorService>;

    fn departments(&self) -> Arc<dyn DepartmentService>;

    fn reports(&self) -> Arc<dyn ReportService>;

    fn antiforgery(&self) -> Arc<dyn AntiforgeryService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    student_service: Arc<dyn StudentService>,
    course_service: Arc<dyn CourseService>,
    instructor_service: Arc<dyn InstructorService>,
    department_service: Arc<dyn DepartmentService>,
    report_service: Arc<dyn ReportService>,
    antiforgery_service: Arc<dyn AntiforgeryService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            student_service: Arc::new(StudentManager::new(uow.clone())),
            course_service: Arc::new(CourseManager::new(uow.clone())),
            instructor_service: Arc::new(InstructorManager::new(uow.clone())),
            department_service: Arc::new(DepartmentManager::new(uow.clone())),
            report_service: Arc::new(ReportManager::new(uow)),
            antiforgery_service: Arc::new(Antiforgery::new(config)),
        }
    }

    /// Replace the student service, e.g. with a mock
    pub fn with_students(mut self, service: Arc<dyn StudentService>) -> Self {
        self.student_service = service;
        self
    }
}

impl ServiceContainer for Services {
    fn students(&self) -> Arc<dyn StudentService> {
        self.student_service.clone()
    }

    fn courses(&self) -> Arc<dyn CourseService> {
        self.course_service.clone()
    }

    fn instructors(&self) -> Arc<dyn InstructorService> {
        self.instructor_service.clone()
    }

    fn departments(&self) -> Arc<dyn DepartmentService> {
        self.department_service.clone()
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        self.report_service.clone()
    }

    fn antiforgery(&self) -> Arc<dyn AntiforgeryService> {
        self.antiforgery_service.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// If either operation fails, the error is returned immediately.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    /// Execute four independent async operations in parallel.
    pub async fn join4<F1, F2, F3, F4, T1, T2, T3, T4>(
        f1: F1,
        f2: F2,
        f3: F3,
        f4: F4,
    ) -> AppResult<(T1, T2, T3, T4)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
        F4: Future<Output = AppResult<T4>>,
    {
        try_join!(f1, f2, f3, f4)
    }
}
