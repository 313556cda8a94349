//! Instructor service - list, details and the create/edit/delete flows.
//!
//! An instructor owns an optional office and a set of course assignments.
//! Create, edit and delete touch several tables and therefore run inside a
//! single transaction: either every change is committed or none is.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;

use super::container::parallel;
use super::lookups::all_courses;
use super::outcome::committed;
use crate::domain::{
    AssignedCourse, Course, CourseAssignments, CourseDetails, Instructor, InstructorDetails,
    InstructorIndex, InstructorInput, InstructorSort, OfficeAssignment,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::repositories::entities::{course_instructor, instructor, office_assignment};
use crate::infra::repositories::{CourseAssignmentFilter, CourseFilter, DepartmentFilter};
use crate::infra::{RepositoryScope, TransactionContext, UnitOfWork};
use crate::types::{Confirmation, FormView, Lookups, ModelErrors, Submission};
use crate::with_transaction;

pub type InstructorFormView = FormView<InstructorInput>;

/// Instructor use cases
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait InstructorService: Send + Sync {
    /// Every instructor; with `selected`, also that instructor's courses
    async fn index(
        &self,
        selected: Option<i32>,
        sort: InstructorSort,
    ) -> AppResult<InstructorIndex>;

    async fn details(&self, id: i32) -> AppResult<InstructorDetails>;

    async fn create_form(&self) -> AppResult<InstructorFormView>;

    async fn create(&self, input: InstructorInput) -> AppResult<Submission<InstructorFormView>>;

    async fn edit_form(&self, id: i32) -> AppResult<InstructorFormView>;

    /// Update the instructor, its office and its course assignments
    async fn edit(
        &self,
        id: i32,
        input: InstructorInput,
    ) -> AppResult<Submission<InstructorFormView>>;

    async fn delete_confirmation(&self, id: i32) -> AppResult<Confirmation<InstructorDetails>>;

    /// Delete the instructor after releasing its departments, office and courses
    async fn delete(&self, id: i32) -> AppResult<Submission<Confirmation<InstructorDetails>>>;
}

/// Concrete implementation of InstructorService using Unit of Work.
pub struct InstructorManager<U: UnitOfWork> {
    uow: Arc<U>,
}

/// Offices, assignments and courses needed to describe instructors
struct Roster {
    offices: HashMap<i32, String>,
    teaching: HashMap<i32, BTreeSet<i32>>,
    courses: HashMap<i32, CourseDetails>,
}

impl Roster {
    fn courses_of(&self, instructor_id: i32) -> Vec<CourseDetails> {
        self.teaching
            .get(&instructor_id)
            .into_iter()
            .flatten()
            .filter_map(|course_id| self.courses.get(course_id).cloned())
            .collect()
    }

    fn describe(&self, model: instructor::Model) -> InstructorDetails {
        InstructorDetails {
            office_location: self.offices.get(&model.id).cloned(),
            courses: self.courses_of(model.id),
            instructor: Instructor::from(model),
        }
    }
}

impl<U: UnitOfWork> InstructorManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn find(&self, id: i32) -> AppResult<instructor::Model> {
        self.uow.instructors().get_by_id(id).await?.ok_or_not_found()
    }

    async fn roster(&self) -> AppResult<Roster> {
        let (offices, assignments, courses, departments) = parallel::join4(
            self.uow.office_assignments().get_all().all(),
            self.uow.course_assignments().get_all().all(),
            all_courses(self.uow.as_ref()),
            self.uow.departments().get_all().all(),
        )
        .await?;

        let department_names: HashMap<i32, String> =
            departments.into_iter().map(|d| (d.id, d.name)).collect();

        let mut teaching: HashMap<i32, BTreeSet<i32>> = HashMap::new();
        for assignment in assignments {
            teaching
                .entry(assignment.instructor_id)
                .or_default()
                .insert(assignment.course_id);
        }

        Ok(Roster {
            offices: offices
                .into_iter()
                .map(|o| (o.instructor_id, o.location))
                .collect(),
            teaching,
            courses: courses
                .into_iter()
                .map(|model| {
                    let details = CourseDetails {
                        department_name: department_names.get(&model.department_id).cloned(),
                        course: Course::from(model),
                    };
                    (details.course.id, details)
                })
                .collect(),
        })
    }

    async fn assigned_course_ids(&self, id: i32) -> AppResult<BTreeSet<i32>> {
        Ok(self
            .uow
            .course_assignments()
            .get_by_search(&CourseAssignmentFilter::Instructor(id))
            .all()
            .await?
            .into_iter()
            .map(|a| a.course_id)
            .collect())
    }

    /// Course checklist with `assigned` ticked
    async fn course_lookups(&self, assigned: &BTreeSet<i32>) -> AppResult<Lookups> {
        let courses = all_courses(self.uow.as_ref()).await?;
        Ok(Lookups::courses(AssignedCourse::checklist(
            courses.into_iter().map(|c| (c.id, c.title)),
            assigned,
        )))
    }

    async fn describe(&self, model: instructor::Model) -> AppResult<InstructorDetails> {
        Ok(self.roster().await?.describe(model))
    }
}

#[async_trait]
impl<U: UnitOfWork> InstructorService for InstructorManager<U> {
    async fn index(
        &self,
        selected: Option<i32>,
        sort: InstructorSort,
    ) -> AppResult<InstructorIndex> {
        if let Some(id) = selected {
            self.find(id).await?;
        }

        let (instructors, roster) = parallel::join2(
            self.uow.instructors().get_all().sort(sort).all(),
            self.roster(),
        )
        .await?;

        Ok(InstructorIndex {
            courses: selected.map(|id| roster.courses_of(id)),
            instructors: instructors
                .into_iter()
                .map(|model| roster.describe(model))
                .collect(),
            selected_instructor: selected,
            current_sort: sort,
        })
    }

    async fn details(&self, id: i32) -> AppResult<InstructorDetails> {
        let model = self.find(id).await?;
        self.describe(model).await
    }

    async fn create_form(&self) -> AppResult<InstructorFormView> {
        Ok(FormView::empty().lookups(self.course_lookups(&BTreeSet::new()).await?))
    }

    async fn create(&self, input: InstructorInput) -> AppResult<Submission<InstructorFormView>> {
        let lookups = self.course_lookups(&input.selected_course_ids()).await?;
        let form = match input.bind() {
            Ok(form) => form,
            Err(errors) => {
                let view = FormView::with_values(None, input).lookups(lookups).errors(errors);
                return Ok(Submission::Invalid(view));
            }
        };

        let saved = with_transaction!(self.uow, |ctx| {
            let instructor = ctx
                .instructors()
                .add(instructor::ActiveModel::from(&form))
                .await?;
            save_office(&ctx, instructor.id, form.office()).await?;
            reassign_courses(&ctx, instructor.id, form.selected_courses.clone()).await?;
            Ok(instructor.id)
        });

        match committed(saved, "create instructor")? {
            Some(instructor_id) => {
                tracing::info!(instructor_id, "Instructor created");
                Ok(Submission::Saved)
            }
            None => Ok(Submission::SaveFailed(
                FormView::with_values(None, input)
                    .lookups(lookups)
                    .errors(ModelErrors::save_failed()),
            )),
        }
    }

    async fn edit_form(&self, id: i32) -> AppResult<InstructorFormView> {
        let instructor = Instructor::from(self.find(id).await?);
        let (office, assigned) = parallel::join2(
            self.uow.office_assignments().get_by_id(id),
            self.assigned_course_ids(id),
        )
        .await?;

        let office = office.map(OfficeAssignment::from);
        let lookups = self.course_lookups(&assigned).await?;
        let values = InstructorInput::for_instructor(&instructor, office.as_ref(), assigned);

        Ok(FormView::with_values(Some(id), values).lookups(lookups))
    }

    async fn edit(
        &self,
        id: i32,
        input: InstructorInput,
    ) -> AppResult<Submission<InstructorFormView>> {
        let mut model = self.find(id).await?;

        let lookups = self.course_lookups(&input.selected_course_ids()).await?;
        let form = match input.bind() {
            Ok(form) => form,
            Err(errors) => {
                let view = FormView::with_values(Some(id), input).lookups(lookups).errors(errors);
                return Ok(Submission::Invalid(view));
            }
        };

        model.apply(&form);
        let saved = with_transaction!(self.uow, |ctx| {
            ctx.instructors().update(model).await?;
            save_office(&ctx, id, form.office()).await?;
            reassign_courses(&ctx, id, form.selected_courses.clone()).await
        });

        match committed(saved, "edit instructor")? {
            Some(changes) => {
                tracing::info!(
                    instructor_id = id,
                    added = changes.added.len(),
                    removed = changes.removed.len(),
                    "Instructor updated"
                );
                Ok(Submission::Saved)
            }
            None => Ok(Submission::SaveFailed(
                FormView::with_values(Some(id), input)
                    .lookups(lookups)
                    .errors(ModelErrors::save_failed()),
            )),
        }
    }

    async fn delete_confirmation(&self, id: i32) -> AppResult<Confirmation<InstructorDetails>> {
        let model = self.find(id).await?;
        Ok(Confirmation::new(self.describe(model).await?))
    }

    async fn delete(&self, id: i32) -> AppResult<Submission<Confirmation<InstructorDetails>>> {
        let model = self.find(id).await?;
        let details = self.describe(model.clone()).await?;

        let deleted = with_transaction!(self.uow, |ctx| {
            for mut department in ctx
                .departments()
                .get_by_search(&DepartmentFilter::Administrator(id))
                .all()
                .await?
            {
                department.instructor_id = None;
                ctx.departments().update(department).await?;
            }

            save_office(&ctx, id, None).await?;
            reassign_courses(&ctx, id, BTreeSet::new()).await?;
            ctx.instructors().delete(model).await
        });

        match committed(deleted, "delete instructor")? {
            Some(()) => {
                tracing::info!(instructor_id = id, "Instructor deleted");
                Ok(Submission::Saved)
            }
            None => Ok(Submission::SaveFailed(Confirmation::save_failed(details))),
        }
    }
}

/// Create, move or remove the instructor's office so it matches `location`
async fn save_office(
    ctx: &TransactionContext<'_>,
    instructor_id: i32,
    location: Option<String>,
) -> AppResult<()> {
    let offices = ctx.office_assignments();
    match (offices.get_by_id(instructor_id).await?, location) {
        (Some(mut office), Some(location)) => {
            if office.location != location {
                office.location = location;
                offices.update(office).await?;
            }
        }
        (None, Some(location)) => {
            offices
                .add(office_assignment::ActiveModel::located(instructor_id, location))
                .await?;
        }
        (Some(office), None) => offices.delete(office).await?,
        (None, None) => {}
    }
    Ok(())
}

/// Make the instructor's course assignments equal to `submitted`, ignoring
/// ids that are not existing courses
async fn reassign_courses(
    ctx: &TransactionContext<'_>,
    instructor_id: i32,
    submitted: BTreeSet<i32>,
) -> AppResult<CourseAssignments> {
    let assignments = ctx.course_assignments();
    let current_rows = assignments
        .get_by_search(&CourseAssignmentFilter::Instructor(instructor_id))
        .all()
        .await?;
    let current: BTreeSet<i32> = current_rows.iter().map(|a| a.course_id).collect();

    let existing: BTreeSet<i32> = if submitted.is_empty() {
        BTreeSet::new()
    } else {
        ctx.courses()
            .get_by_search(&CourseFilter::Ids(submitted.clone()))
            .all()
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect()
    };

    let changes = CourseAssignments::reconcile(&current, &submitted, &existing);

    for row in current_rows {
        if changes.removed.contains(&row.course_id) {
            assignments.delete(row).await?;
        }
    }
    for course_id in &changes.added {
        assignments
            .add(course_instructor::ActiveModel::assign(*course_id, instructor_id))
            .await?;
    }

    if !changes.is_empty() {
        tracing::debug!(
            instructor_id,
            added = ?changes.added,
            removed = ?changes.removed,
            "Course assignments reconciled"
        );
    }
    Ok(changes)
}
