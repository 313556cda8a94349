//! Department service - list, details and the create/edit/delete flows.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::lookups::{all_instructors, instructor_options};
use super::outcome::committed;
use crate::domain::{
    Department, DepartmentDetails, DepartmentForm, DepartmentInput, DepartmentSort, Instructor,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::repositories::entities::department;
use crate::infra::UnitOfWork;
use crate::types::{Confirmation, FormView, Lookups, ModelErrors, Submission};

pub type DepartmentFormView = FormView<DepartmentInput>;

/// Department use cases
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait DepartmentService: Send + Sync {
    async fn index(&self, sort: DepartmentSort) -> AppResult<Vec<DepartmentDetails>>;

    async fn details(&self, id: i32) -> AppResult<DepartmentDetails>;

    async fn create_form(&self) -> AppResult<DepartmentFormView>;

    async fn create(&self, input: DepartmentInput) -> AppResult<Submission<DepartmentFormView>>;

    async fn edit_form(&self, id: i32) -> AppResult<DepartmentFormView>;

    async fn edit(
        &self,
        id: i32,
        input: DepartmentInput,
    ) -> AppResult<Submission<DepartmentFormView>>;

    async fn delete_confirmation(&self, id: i32) -> AppResult<Confirmation<DepartmentDetails>>;

    /// Delete the department together with its courses
    async fn delete(&self, id: i32) -> AppResult<Submission<Confirmation<DepartmentDetails>>>;
}

/// Concrete implementation of DepartmentService using Unit of Work.
pub struct DepartmentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DepartmentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn find(&self, id: i32) -> AppResult<department::Model> {
        self.uow.departments().get_by_id(id).await?.ok_or_not_found()
    }

    async fn with_administrator(&self, model: department::Model) -> AppResult<DepartmentDetails> {
        let administrator_name = match model.instructor_id {
            Some(id) => self
                .uow
                .instructors()
                .get_by_id(id)
                .await?
                .map(|i| Instructor::from(i).full_name()),
            None => None,
        };

        Ok(DepartmentDetails {
            department: Department::from(model),
            administrator_name,
        })
    }

    async fn instructor_lookups(&self, selected: Option<i32>) -> AppResult<Lookups> {
        Ok(Lookups::instructors(
            instructor_options(self.uow.as_ref(), selected).await?,
        ))
    }

    /// Bind the submitted text and check the administrator reference
    async fn bind(
        &self,
        input: &DepartmentInput,
    ) -> AppResult<Result<DepartmentForm, ModelErrors>> {
        let form = match input.bind() {
            Ok(form) => form,
            Err(errors) => return Ok(Err(errors)),
        };

        if let Some(id) = form.administrator_id {
            if self.uow.instructors().get_by_id(id).await?.is_none() {
                let mut errors = ModelErrors::new();
                errors.add("administrator_id", "Select an existing instructor");
                return Ok(Err(errors));
            }
        }
        Ok(Ok(form))
    }
}

#[async_trait]
impl<U: UnitOfWork> DepartmentService for DepartmentManager<U> {
    async fn index(&self, sort: DepartmentSort) -> AppResult<Vec<DepartmentDetails>> {
        let administrators: HashMap<i32, String> = all_instructors(self.uow.as_ref())
            .await?
            .into_iter()
            .map(Instructor::from)
            .map(|i| (i.id, i.full_name()))
            .collect();

        let departments = self.uow.departments().get_all().sort(sort).all().await?;

        Ok(departments
            .into_iter()
            .map(|model| DepartmentDetails {
                administrator_name: model
                    .instructor_id
                    .and_then(|id| administrators.get(&id).cloned()),
                department: Department::from(model),
            })
            .collect())
    }

    async fn details(&self, id: i32) -> AppResult<DepartmentDetails> {
        let model = self.find(id).await?;
        self.with_administrator(model).await
    }

    async fn create_form(&self) -> AppResult<DepartmentFormView> {
        Ok(FormView::empty().lookups(self.instructor_lookups(None).await?))
    }

    async fn create(&self, input: DepartmentInput) -> AppResult<Submission<DepartmentFormView>> {
        let lookups = self.instructor_lookups(input.selected_administrator()).await?;
        let form = match self.bind(&input).await? {
            Ok(form) => form,
            Err(errors) => {
                let view = FormView::with_values(None, input).lookups(lookups).errors(errors);
                return Ok(Submission::Invalid(view));
            }
        };

        let saved = self
            .uow
            .departments()
            .add(department::ActiveModel::from(&form))
            .await;
        match committed(saved, "create department")? {
            Some(department) => {
                tracing::info!(department_id = department.id, "Department created");
                Ok(Submission::Saved)
            }
            None => Ok(Submission::SaveFailed(
                FormView::with_values(None, input)
                    .lookups(lookups)
                    .errors(ModelErrors::save_failed()),
            )),
        }
    }

    async fn edit_form(&self, id: i32) -> AppResult<DepartmentFormView> {
        let department = Department::from(self.find(id).await?);
        let lookups = self.instructor_lookups(department.administrator_id).await?;

        Ok(FormView::with_values(Some(id), DepartmentInput::from(&department)).lookups(lookups))
    }

    async fn edit(
        &self,
        id: i32,
        input: DepartmentInput,
    ) -> AppResult<Submission<DepartmentFormView>> {
        let mut model = self.find(id).await?;

        let lookups = self.instructor_lookups(input.selected_administrator()).await?;
        let form = match self.bind(&input).await? {
            Ok(form) => form,
            Err(errors) => {
                let view = FormView::with_values(Some(id), input).lookups(lookups).errors(errors);
                return Ok(Submission::Invalid(view));
            }
        };

        model.apply(&form);
        match committed(self.uow.departments().update(model).await, "edit department")? {
            Some(_) => {
                tracing::info!(department_id = id, "Department updated");
                Ok(Submission::Saved)
            }
            None => Ok(Submission::SaveFailed(
                FormView::with_values(Some(id), input)
                    .lookups(lookups)
                    .errors(ModelErrors::save_failed()),
            )),
        }
    }

    async fn delete_confirmation(&self, id: i32) -> AppResult<Confirmation<DepartmentDetails>> {
        let model = self.find(id).await?;
        Ok(Confirmation::new(self.with_administrator(model).await?))
    }

    async fn delete(&self, id: i32) -> AppResult<Submission<Confirmation<DepartmentDetails>>> {
        let model = self.find(id).await?;
        let details = self.with_administrator(model.clone()).await?;

        match committed(self.uow.departments().delete(model).await, "delete department")? {
            Some(()) => {
                tracing::info!(department_id = id, "Department deleted");
                Ok(Submission::Saved)
            }
            None => Ok(Submission::SaveFailed(Confirmation::save_failed(details))),
        }
    }
}
