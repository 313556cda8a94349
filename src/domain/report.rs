//! Enrollment statistics shown on the home page.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::student::Student;

/// Number of students who enrolled on a given date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EnrollmentDateGroup {
    pub enrollment_date: NaiveDate,
    pub student_count: u64,
}

/// Group students by enrollment date, oldest date first
pub fn group_by_enrollment_date<'a, I>(students: I) -> Vec<EnrollmentDateGroup>
where
    I: IntoIterator<Item = &'a Student>,
{
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for student in students {
        *counts.entry(student.enrollment_date).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(enrollment_date, student_count)| EnrollmentDateGroup {
            enrollment_date,
            student_count,
        })
        .collect()
}
