//! Student service - list, details and the create/edit/delete flows.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;

use super::outcome::committed;
use crate::config::STUDENT_PAGE_SIZE;
use crate::domain::{
    EnrollmentLine, Grade, Student, StudentDetails, StudentIndex, StudentInput, StudentQuery,
    StudentSortLinks,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::repositories::entities::student;
use crate::infra::repositories::{CourseFilter, EnrollmentFilter, StudentFilter};
use crate::infra::UnitOfWork;
use crate::types::{Confirmation, FormView, ModelErrors, PageRequest, Submission};

/// Form shown for student create and edit
pub type StudentFormView = FormView<StudentInput>;

/// Student use cases
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait StudentService: Send + Sync {
    /// One page of students, optionally narrowed by a name search
    async fn index(&self, query: StudentQuery) -> AppResult<StudentIndex>;

    async fn details(&self, id: i32) -> AppResult<StudentDetails>;

    async fn create_form(&self) -> AppResult<StudentFormView>;

    async fn create(&self, input: StudentInput) -> AppResult<Submission<StudentFormView>>;

    async fn edit_form(&self, id: i32) -> AppResult<StudentFormView>;

    async fn edit(&self, id: i32, input: StudentInput) -> AppResult<Submission<StudentFormView>>;

    async fn delete_confirmation(&self, id: i32) -> AppResult<Confirmation<Student>>;

    async fn delete(&self, id: i32) -> AppResult<Submission<Confirmation<Student>>>;
}

/// Concrete implementation of StudentService using Unit of Work.
pub struct StudentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> StudentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn find(&self, id: i32) -> AppResult<student::Model> {
        self.uow.students().get_by_id(id).await?.ok_or_not_found()
    }
}

#[async_trait]
impl<U: UnitOfWork> StudentService for StudentManager<U> {
    async fn index(&self, query: StudentQuery) -> AppResult<StudentIndex> {
        let students = self.uow.students();
        let listing = match &query.search {
            Some(text) => students.get_by_search(&StudentFilter::NameContains(text.clone())),
            None => students.get_all(),
        };

        let page = listing
            .sort(query.sort)
            .page(PageRequest::new(query.page, STUDENT_PAGE_SIZE))
            .await?;

        Ok(StudentIndex {
            students: page.map(Student::from),
            current_sort: query.sort,
            current_filter: query.search,
            sort_links: StudentSortLinks::for_current(query.sort),
        })
    }

    async fn details(&self, id: i32) -> AppResult<StudentDetails> {
        let student = Student::from(self.find(id).await?);

        let mut enrollments = self
            .uow
            .enrollments()
            .get_by_search(&EnrollmentFilter::Student(id))
            .all()
            .await?;
        enrollments.sort_by_key(|e| e.id);

        let course_ids: BTreeSet<i32> = enrollments.iter().map(|e| e.course_id).collect();
        let titles: HashMap<i32, String> = self
            .uow
            .courses()
            .get_by_search(&CourseFilter::Ids(course_ids))
            .all()
            .await?
            .into_iter()
            .map(|course| (course.id, course.title))
            .collect();

        let enrollments = enrollments
            .into_iter()
            .map(|e| EnrollmentLine {
                enrollment_id: e.id,
                course_id: e.course_id,
                course_title: titles.get(&e.course_id).cloned().unwrap_or_default(),
                grade: e.grade.as_deref().and_then(Grade::parse),
            })
            .collect();

        Ok(StudentDetails {
            student,
            enrollments,
        })
    }

    async fn create_form(&self) -> AppResult<StudentFormView> {
        Ok(FormView::empty())
    }

    async fn create(&self, input: StudentInput) -> AppResult<Submission<StudentFormView>> {
        let form = match input.bind() {
            Ok(form) => form,
            Err(errors) => {
                let view = FormView::with_values(None, input).errors(errors);
                return Ok(Submission::Invalid(view));
            }
        };

        let saved = self.uow.students().add(student::ActiveModel::from(&form)).await;
        match committed(saved, "create student")? {
            Some(student) => {
                tracing::info!(student_id = student.id, "Student created");
                Ok(Submission::Saved)
            }
            None => Ok(Submission::SaveFailed(
                FormView::with_values(None, input).errors(ModelErrors::save_failed()),
            )),
        }
    }

    async fn edit_form(&self, id: i32) -> AppResult<StudentFormView> {
        let student = Student::from(self.find(id).await?);
        Ok(FormView::with_values(Some(id), StudentInput::from(&student)))
    }

    async fn edit(&self, id: i32, input: StudentInput) -> AppResult<Submission<StudentFormView>> {
        let mut model = self.find(id).await?;

        let form = match input.bind() {
            Ok(form) => form,
            Err(errors) => {
                let view = FormView::with_values(Some(id), input).errors(errors);
                return Ok(Submission::Invalid(view));
            }
        };

        model.apply(&form);
        match committed(self.uow.students().update(model).await, "edit student")? {
            Some(_) => {
                tracing::info!(student_id = id, "Student updated");
                Ok(Submission::Saved)
            }
            None => Ok(Submission::SaveFailed(
                FormView::with_values(Some(id), input).errors(ModelErrors::save_failed()),
            )),
        }
    }

    async fn delete_confirmation(&self, id: i32) -> AppResult<Confirmation<Student>> {
        Ok(Confirmation::new(Student::from(self.find(id).await?)))
    }

    async fn delete(&self, id: i32) -> AppResult<Submission<Confirmation<Student>>> {
        let model = self.find(id).await?;
        let student = Student::from(model.clone());

        match committed(self.uow.students().delete(model).await, "delete student")? {
            Some(()) => {
                tracing::info!(student_id = id, "Student deleted");
                Ok(Submission::Saved)
            }
            None => Ok(Submission::SaveFailed(Confirmation::save_failed(student))),
        }
    }
}
