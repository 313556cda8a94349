//! Report service - enrollment statistics for the home page.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{group_by_enrollment_date, EnrollmentDateGroup, Student};
use crate::errors::AppResult;
use crate::infra::{RepositoryScope, UnitOfWork};

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Student counts per enrollment date, oldest first
    async fn enrollment_dates(&self) -> AppResult<Vec<EnrollmentDateGroup>>;
}

/// Concrete implementation of ReportService using Unit of Work.
pub struct ReportManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReportManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReportService for ReportManager<U> {
    async fn enrollment_dates(&self) -> AppResult<Vec<EnrollmentDateGroup>> {
        let students: Vec<Student> = self
            .uow
            .students()
            .get_all()
            .all()
            .await?
            .into_iter()
            .map(Student::from)
            .collect();

        Ok(group_by_enrollment_date(&students))
    }
}
