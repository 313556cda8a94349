//! Student domain entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::enrollment::EnrollmentLine;
use super::sorting::{sort_order, toggle};
use crate::config::DEFAULT_PAGE_NUMBER;
use crate::types::{FormBinder, ModelErrors, Paginated};

/// Student domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    pub id: i32,
    pub last_name: String,
    pub first_mid_name: String,
    pub enrollment_date: NaiveDate,
}

/// The student form as entered: text, so that a value that does not parse
/// can be shown back to the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct StudentInput {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Last name is required and cannot be longer than 50 characters"
    ))]
    #[schema(example = "Alexander")]
    pub last_name: String,
    #[validate(length(
        min = 1,
        max = 50,
        message = "First name is required and cannot be longer than 50 characters"
    ))]
    #[schema(example = "Carson")]
    pub first_mid_name: String,
    #[schema(format = Date, example = "2005-09-01")]
    pub enrollment_date: String,
}

impl StudentInput {
    pub fn bind(&self) -> Result<StudentForm, ModelErrors> {
        let mut binder = FormBinder::new(self);
        let enrollment_date =
            binder.required("enrollment_date", "Enrollment Date", &self.enrollment_date);

        binder.finish(enrollment_date.map(|enrollment_date| StudentForm {
            last_name: self.last_name.clone(),
            first_mid_name: self.first_mid_name.clone(),
            enrollment_date,
        }))
    }
}

impl From<&Student> for StudentInput {
    fn from(student: &Student) -> Self {
        Self {
            last_name: student.last_name.clone(),
            first_mid_name: student.first_mid_name.clone(),
            enrollment_date: student.enrollment_date.to_string(),
        }
    }
}

/// Student fields once bound and validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentForm {
    pub last_name: String,
    pub first_mid_name: String,
    pub enrollment_date: NaiveDate,
}

sort_order! {
    /// Student list order
    pub enum StudentSort {
        LastName => "lastname",
        LastNameDesc => "lastname_desc",
        FirstName => "firstname",
        FirstNameDesc => "firstname_desc",
        EnrollmentDate => "date",
        EnrollmentDateDesc => "date_desc",
    }
}

/// `sortOrder` values for the column headers of the current list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StudentSortLinks {
    pub last_name: StudentSort,
    pub first_name: StudentSort,
    pub enrollment_date: StudentSort,
}

impl StudentSortLinks {
    pub fn for_current(current: StudentSort) -> Self {
        Self {
            last_name: toggle(current, StudentSort::LastName, StudentSort::LastNameDesc),
            first_name: toggle(current, StudentSort::FirstName, StudentSort::FirstNameDesc),
            enrollment_date: toggle(
                current,
                StudentSort::EnrollmentDate,
                StudentSort::EnrollmentDateDesc,
            ),
        }
    }
}

/// Resolved student list request.
///
/// A submitted search (`searchValue`, even empty) restarts at page 1;
/// otherwise the filter carried over from the previous page (`currentFilter`)
/// stays in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentQuery {
    pub sort: StudentSort,
    pub search: Option<String>,
    pub page: u64,
}

impl StudentQuery {
    pub fn resolve(
        sort_order: Option<&str>,
        current_filter: Option<String>,
        search_value: Option<String>,
        page: Option<u64>,
    ) -> Self {
        let (search, page) = match search_value {
            Some(value) => (value, DEFAULT_PAGE_NUMBER),
            None => (
                current_filter.unwrap_or_default(),
                page.unwrap_or(DEFAULT_PAGE_NUMBER),
            ),
        };
        let search = search.trim();

        Self {
            sort: StudentSort::parse(sort_order),
            search: (!search.is_empty()).then(|| search.to_string()),
            page: page.max(DEFAULT_PAGE_NUMBER),
        }
    }
}

/// Student list view
#[derive(Debug, Clone, Serialize)]
pub struct StudentIndex {
    pub students: Paginated<Student>,
    pub current_sort: StudentSort,
    pub current_filter: Option<String>,
    pub sort_links: StudentSortLinks,
}

/// Student with the courses they are enrolled in
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StudentDetails {
    #[serde(flatten)]
    pub student: Student,
    pub enrollments: Vec<EnrollmentLine>,
}
