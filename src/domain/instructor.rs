//! Instructor domain entity, office assignment and course assignments.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::course::CourseDetails;
use super::sorting::sort_order;
use crate::types::{FormBinder, ModelErrors};

/// Instructor domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Instructor {
    pub id: i32,
    pub last_name: String,
    pub first_mid_name: String,
    pub hire_date: NaiveDate,
}

impl Instructor {
    /// "Last, FirstMid", as shown in administrator dropdowns
    pub fn full_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_mid_name)
    }
}

/// An instructor's office; owned by exactly one instructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OfficeAssignment {
    pub instructor_id: i32,
    pub location: String,
}

/// The instructor form as entered.
///
/// `selected_courses` is the complete set of courses the instructor should
/// teach after the submission; leaving it out clears every assignment.
/// Entries that are not course numbers match no course and are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct InstructorInput {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Last name is required and cannot be longer than 50 characters"
    ))]
    pub last_name: String,
    #[validate(length(
        min = 1,
        max = 50,
        message = "First name is required and cannot be longer than 50 characters"
    ))]
    pub first_mid_name: String,
    #[schema(format = Date, example = "2002-07-06")]
    pub hire_date: String,
    #[validate(length(max = 50, message = "Office location cannot be longer than 50 characters"))]
    #[schema(example = "Smith 17")]
    pub office_location: Option<String>,
    pub selected_courses: Vec<String>,
}

impl InstructorInput {
    pub fn bind(&self) -> Result<InstructorForm, ModelErrors> {
        let mut binder = FormBinder::new(self);
        let hire_date = binder.required("hire_date", "Hire Date", &self.hire_date);

        binder.finish(hire_date.map(|hire_date| InstructorForm {
            last_name: self.last_name.clone(),
            first_mid_name: self.first_mid_name.clone(),
            hire_date,
            office_location: self.office_location.clone(),
            selected_courses: self.selected_course_ids(),
        }))
    }

    /// Course numbers among the submitted entries
    pub fn selected_course_ids(&self) -> BTreeSet<i32> {
        self.selected_courses
            .iter()
            .filter_map(|id| id.trim().parse().ok())
            .collect()
    }

    /// Pre-filled form for an existing instructor
    pub fn for_instructor(
        instructor: &Instructor,
        office: Option<&OfficeAssignment>,
        course_ids: impl IntoIterator<Item = i32>,
    ) -> Self {
        Self {
            last_name: instructor.last_name.clone(),
            first_mid_name: instructor.first_mid_name.clone(),
            hire_date: instructor.hire_date.to_string(),
            office_location: office.map(|o| o.location.clone()),
            selected_courses: course_ids.into_iter().map(|id| id.to_string()).collect(),
        }
    }
}

/// Instructor fields once bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorForm {
    pub last_name: String,
    pub first_mid_name: String,
    pub hire_date: NaiveDate,
    pub office_location: Option<String>,
    pub selected_courses: BTreeSet<i32>,
}

impl InstructorForm {
    /// Office location to store, if any; blank means no office
    pub fn office(&self) -> Option<String> {
        self.office_location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
            .map(str::to_string)
    }
}

/// Checklist entry for the course assignment editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AssignedCourse {
    pub course_id: i32,
    pub title: String,
    pub assigned: bool,
}

impl AssignedCourse {
    /// Checklist over `courses` (id, title), ticking the ids in `assigned`
    pub fn checklist<I>(courses: I, assigned: &BTreeSet<i32>) -> Vec<AssignedCourse>
    where
        I: IntoIterator<Item = (i32, String)>,
    {
        courses
            .into_iter()
            .map(|(course_id, title)| AssignedCourse {
                course_id,
                title,
                assigned: assigned.contains(&course_id),
            })
            .collect()
    }
}

/// Changes that turn an instructor's current course set into the submitted one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseAssignments {
    pub added: BTreeSet<i32>,
    pub removed: BTreeSet<i32>,
}

impl CourseAssignments {
    /// Compare `current` with `submitted`. Submitted ids that are not in
    /// `existing` (the known course numbers) are ignored.
    pub fn reconcile(
        current: &BTreeSet<i32>,
        submitted: &BTreeSet<i32>,
        existing: &BTreeSet<i32>,
    ) -> Self {
        let wanted: BTreeSet<i32> = submitted.intersection(existing).copied().collect();

        Self {
            added: wanted.difference(current).copied().collect(),
            removed: current.difference(&wanted).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// The course set after applying these changes to `current`
    pub fn apply(&self, current: &BTreeSet<i32>) -> BTreeSet<i32> {
        current
            .difference(&self.removed)
            .chain(self.added.iter())
            .copied()
            .collect()
    }
}

sort_order! {
    /// Instructor list order
    pub enum InstructorSort {
        LastName => "lastname",
        LastNameDesc => "lastname_desc",
        HireDate => "hiredate",
        HireDateDesc => "hiredate_desc",
    }
}

/// Instructor with office and taught courses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct InstructorDetails {
    #[serde(flatten)]
    pub instructor: Instructor,
    pub office_location: Option<String>,
    pub courses: Vec<CourseDetails>,
}

/// Instructor list; when an instructor is selected its courses are listed too
#[derive(Debug, Clone, Serialize)]
pub struct InstructorIndex {
    pub instructors: Vec<InstructorDetails>,
    pub selected_instructor: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<CourseDetails>>,
    pub current_sort: InstructorSort,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[i32]) -> BTreeSet<i32> {
        ids.iter().copied().collect()
    }

    #[test]
    fn reconcile_adds_and_removes_the_difference() {
        let existing = set(&[1, 2, 3, 4, 5]);
        let changes = CourseAssignments::reconcile(&set(&[1, 2, 3]), &set(&[2, 3, 4]), &existing);

        assert_eq!(changes.added, set(&[4]));
        assert_eq!(changes.removed, set(&[1]));
        assert_eq!(changes.apply(&set(&[1, 2, 3])), set(&[2, 3, 4]));
    }

    #[test]
    fn empty_submission_clears_everything() {
        let existing = set(&[1, 2, 3]);
        let changes = CourseAssignments::reconcile(&set(&[1, 2, 3]), &set(&[]), &existing);

        assert!(changes.added.is_empty());
        assert_eq!(changes.removed, set(&[1, 2, 3]));
        assert!(changes.apply(&set(&[1, 2, 3])).is_empty());
    }

    #[test]
    fn unknown_course_ids_are_ignored() {
        let changes = CourseAssignments::reconcile(&set(&[]), &set(&[7, 99]), &set(&[7]));

        assert_eq!(changes.added, set(&[7]));
        assert!(changes.removed.is_empty());
    }

    #[test]
    fn unchanged_selection_is_a_no_op() {
        let changes = CourseAssignments::reconcile(&set(&[2, 3]), &set(&[3, 2]), &set(&[1, 2, 3]));
        assert!(changes.is_empty());
    }

    #[test]
    fn blank_office_location_means_no_office() {
        let form = InstructorForm {
            last_name: "Kapoor".to_string(),
            first_mid_name: "Candace".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2001, 1, 15).unwrap(),
            office_location: Some("   ".to_string()),
            selected_courses: BTreeSet::new(),
        };
        assert_eq!(form.office(), None);

        let form = InstructorForm {
            office_location: Some(" Thompson 304 ".to_string()),
            ..form
        };
        assert_eq!(form.office().as_deref(), Some("Thompson 304"));
    }

    #[test]
    fn bind_keeps_only_course_numbers() {
        let input = InstructorInput {
            last_name: "Harui".to_string(),
            first_mid_name: "Roger".to_string(),
            hire_date: "1998-07-01".to_string(),
            office_location: None,
            selected_courses: vec!["1045".into(), " 3141 ".into(), "chemistry".into()],
        };

        let form = input.bind().unwrap();
        assert_eq!(form.selected_courses, set(&[1045, 3141]));
        assert_eq!(form.hire_date, NaiveDate::from_ymd_opt(1998, 7, 1).unwrap());

        let errors = InstructorInput {
            hire_date: "1998-13-40".to_string(),
            ..input
        }
        .bind()
        .unwrap_err();
        assert_eq!(errors.field("hire_date").len(), 1);
    }
}
