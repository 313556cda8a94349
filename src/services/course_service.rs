//! Course service - list by department, details and the create/edit/delete flows.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::lookups::{all_departments, department_options};
use super::outcome::committed;
use crate::domain::{Course, CourseDetails, CourseIndex, CourseInput, CourseSort};
use crate::errors::{AppResult, OptionExt};
use crate::infra::repositories::entities::course;
use crate::infra::repositories::CourseFilter;
use crate::infra::UnitOfWork;
use crate::types::{Confirmation, FormView, Lookups, ModelErrors, SelectOption, Submission};

/// Form shown for course create and edit
pub type CourseFormView = FormView<CourseInput>;

/// Course use cases
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait CourseService: Send + Sync {
    /// Courses, optionally only those of one department
    async fn index(&self, department_id: Option<i32>, sort: CourseSort) -> AppResult<CourseIndex>;

    async fn details(&self, id: i32) -> AppResult<CourseDetails>;

    async fn create_form(&self) -> AppResult<CourseFormView>;

    async fn create(&self, input: CourseInput) -> AppResult<Submission<CourseFormView>>;

    async fn edit_form(&self, id: i32) -> AppResult<CourseFormView>;

    async fn edit(&self, id: i32, input: CourseInput) -> AppResult<Submission<CourseFormView>>;

    async fn delete_confirmation(&self, id: i32) -> AppResult<Confirmation<CourseDetails>>;

    async fn delete(&self, id: i32) -> AppResult<Submission<Confirmation<CourseDetails>>>;
}

/// Concrete implementation of CourseService using Unit of Work.
pub struct CourseManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CourseManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn find(&self, id: i32) -> AppResult<course::Model> {
        self.uow.courses().get_by_id(id).await?.ok_or_not_found()
    }

    async fn with_department(&self, model: course::Model) -> AppResult<CourseDetails> {
        let department_name = self
            .uow
            .departments()
            .get_by_id(model.department_id)
            .await?
            .map(|d| d.name);

        Ok(CourseDetails {
            course: Course::from(model),
            department_name,
        })
    }

    async fn department_exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.uow.departments().get_by_id(id).await?.is_some())
    }

    async fn department_lookups(&self, selected: Option<i32>) -> AppResult<Lookups> {
        Ok(Lookups::departments(
            department_options(self.uow.as_ref(), selected).await?,
        ))
    }

    /// Field errors for a department reference that does not resolve
    async fn check_department(&self, id: i32, errors: &mut ModelErrors) -> AppResult<()> {
        if !self.department_exists(id).await? {
            errors.add("department_id", "Select an existing department");
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> CourseService for CourseManager<U> {
    async fn index(&self, department_id: Option<i32>, sort: CourseSort) -> AppResult<CourseIndex> {
        let departments = all_departments(self.uow.as_ref()).await?;
        let names: HashMap<i32, String> =
            departments.iter().map(|d| (d.id, d.name.clone())).collect();

        let courses = self.uow.courses();
        let listing = match department_id {
            Some(id) => courses.get_by_search(&CourseFilter::Department(id)),
            None => courses.get_all(),
        };
        let courses = listing
            .sort(sort)
            .all()
            .await?
            .into_iter()
            .map(|model| CourseDetails {
                department_name: names.get(&model.department_id).cloned(),
                course: Course::from(model),
            })
            .collect();

        Ok(CourseIndex {
            courses,
            departments: SelectOption::list(
                departments.into_iter().map(|d| (d.id, d.name)),
                department_id,
            ),
            selected_department: department_id,
            current_sort: sort,
        })
    }

    async fn details(&self, id: i32) -> AppResult<CourseDetails> {
        let model = self.find(id).await?;
        self.with_department(model).await
    }

    async fn create_form(&self) -> AppResult<CourseFormView> {
        Ok(FormView::empty().lookups(self.department_lookups(None).await?))
    }

    async fn create(&self, input: CourseInput) -> AppResult<Submission<CourseFormView>> {
        let (bound, mut errors) = match input.bind_create() {
            Ok(form) => (Some(form), ModelErrors::new()),
            Err(errors) => (None, errors),
        };
        if let Some(form) = &bound {
            self.check_department(form.department_id, &mut errors).await?;
            if self.uow.courses().get_by_id(form.course_id).await?.is_some() {
                errors.add("course_id", "A course with this number already exists");
            }
        }

        let lookups = self.department_lookups(input.selected_department()).await?;
        let form = match bound {
            Some(form) if errors.is_empty() => form,
            _ => {
                let view = FormView::with_values(None, input).lookups(lookups).errors(errors);
                return Ok(Submission::Invalid(view));
            }
        };

        let saved = self.uow.courses().add(course::ActiveModel::from(&form)).await;
        match committed(saved, "create course")? {
            Some(course) => {
                tracing::info!(course_id = course.id, "Course created");
                Ok(Submission::Saved)
            }
            None => Ok(Submission::SaveFailed(
                FormView::with_values(None, input)
                    .lookups(lookups)
                    .errors(ModelErrors::save_failed()),
            )),
        }
    }

    async fn edit_form(&self, id: i32) -> AppResult<CourseFormView> {
        let course = Course::from(self.find(id).await?);
        let lookups = self.department_lookups(Some(course.department_id)).await?;

        Ok(FormView::with_values(Some(id), CourseInput::from(&course)).lookups(lookups))
    }

    async fn edit(&self, id: i32, input: CourseInput) -> AppResult<Submission<CourseFormView>> {
        let mut model = self.find(id).await?;

        let (bound, mut errors) = match input.bind_update() {
            Ok(form) => (Some(form), ModelErrors::new()),
            Err(errors) => (None, errors),
        };
        if let Some(form) = &bound {
            self.check_department(form.department_id, &mut errors).await?;
        }

        let lookups = self.department_lookups(input.selected_department()).await?;
        let form = match bound {
            Some(form) if errors.is_empty() => form,
            _ => {
                let view = FormView::with_values(Some(id), input).lookups(lookups).errors(errors);
                return Ok(Submission::Invalid(view));
            }
        };

        model.apply(&form);
        match committed(self.uow.courses().update(model).await, "edit course")? {
            Some(_) => {
                tracing::info!(course_id = id, "Course updated");
                Ok(Submission::Saved)
            }
            None => Ok(Submission::SaveFailed(
                FormView::with_values(Some(id), input)
                    .lookups(lookups)
                    .errors(ModelErrors::save_failed()),
            )),
        }
    }

    async fn delete_confirmation(&self, id: i32) -> AppResult<Confirmation<CourseDetails>> {
        let model = self.find(id).await?;
        Ok(Confirmation::new(self.with_department(model).await?))
    }

    async fn delete(&self, id: i32) -> AppResult<Submission<Confirmation<CourseDetails>>> {
        let model = self.find(id).await?;
        let details = self.with_department(model.clone()).await?;

        match committed(self.uow.courses().delete(model).await, "delete course")? {
            Some(()) => {
                tracing::info!(course_id = id, "Course deleted");
                Ok(Submission::Saved)
            }
            None => Ok(Submission::SaveFailed(Confirmation::save_failed(details))),
        }
    }
}
