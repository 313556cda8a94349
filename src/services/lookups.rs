//! Dropdown lists shared by several forms.

use crate::domain::{CourseSort, DepartmentSort, Instructor, InstructorSort};
use crate::errors::AppResult;
use crate::infra::repositories::entities::{course, department, instructor};
use crate::infra::{RepositoryScope, UnitOfWork};
use crate::types::SelectOption;

pub(crate) async fn all_departments<U: UnitOfWork>(uow: &U) -> AppResult<Vec<department::Model>> {
    uow.departments().get_all().sort(DepartmentSort::Name).all().await
}

pub(crate) async fn all_courses<U: UnitOfWork>(uow: &U) -> AppResult<Vec<course::Model>> {
    uow.courses().get_all().sort(CourseSort::Number).all().await
}

pub(crate) async fn all_instructors<U: UnitOfWork>(uow: &U) -> AppResult<Vec<instructor::Model>> {
    uow.instructors()
        .get_all()
        .sort(InstructorSort::LastName)
        .all()
        .await
}

/// Departments as `(id, name)`, ordered by name
pub(crate) async fn department_options<U: UnitOfWork>(
    uow: &U,
    selected: Option<i32>,
) -> AppResult<Vec<SelectOption>> {
    let departments = all_departments(uow).await?;
    Ok(SelectOption::list(
        departments.into_iter().map(|d| (d.id, d.name)),
        selected,
    ))
}

/// Instructors as `(id, "Last, First")`, ordered by last name
pub(crate) async fn instructor_options<U: UnitOfWork>(
    uow: &U,
    selected: Option<i32>,
) -> AppResult<Vec<SelectOption>> {
    let instructors = all_instructors(uow).await?;
    Ok(SelectOption::list(
        instructors
            .into_iter()
            .map(Instructor::from)
            .map(|i| (i.id, i.full_name())),
        selected,
    ))
}
