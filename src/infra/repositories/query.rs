//! Query specifications accepted by [`Listing`](super::Listing).
//!
//! Searches are limited to the enumerated filters below rather than
//! arbitrary predicates; sort orders come from the domain sort enums.

use std::collections::BTreeSet;

use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition, EntityTrait, Order, QueryOrder, Select};

use super::entities::{course, course_instructor, department, enrollment, instructor, student};
use crate::domain::{CourseSort, DepartmentSort, InstructorSort, StudentSort};

/// A constrained search over entity `E`
pub trait SearchFilter<E: EntityTrait> {
    fn condition(&self) -> Condition;
}

/// A row ordering over entity `E`
pub trait SortOrder<E: EntityTrait>: Copy {
    fn apply(self, select: Select<E>) -> Select<E>;
}

// =============================================================================
// Filters
// =============================================================================

/// Student searches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentFilter {
    /// Last or first name contains the text, ignoring case
    NameContains(String),
}

impl SearchFilter<student::Entity> for StudentFilter {
    fn condition(&self) -> Condition {
        match self {
            StudentFilter::NameContains(text) => {
                let pattern = contains_pattern(text);
                Condition::any()
                    .add(lower(student::Column::LastName).like(pattern.clone()))
                    .add(lower(student::Column::FirstMidName).like(pattern))
            }
        }
    }
}

/// Course searches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseFilter {
    Department(i32),
    Ids(BTreeSet<i32>),
}

impl SearchFilter<course::Entity> for CourseFilter {
    fn condition(&self) -> Condition {
        match self {
            CourseFilter::Department(id) => {
                Condition::all().add(course::Column::DepartmentId.eq(*id))
            }
            CourseFilter::Ids(ids) => {
                Condition::all().add(course::Column::Id.is_in(ids.iter().copied()))
            }
        }
    }
}

/// Department searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentFilter {
    /// Departments administered by the instructor
    Administrator(i32),
}

impl SearchFilter<department::Entity> for DepartmentFilter {
    fn condition(&self) -> Condition {
        match self {
            DepartmentFilter::Administrator(id) => {
                Condition::all().add(department::Column::InstructorId.eq(*id))
            }
        }
    }
}

/// Enrollment searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentFilter {
    Student(i32),
    Course(i32),
}

impl SearchFilter<enrollment::Entity> for EnrollmentFilter {
    fn condition(&self) -> Condition {
        match self {
            EnrollmentFilter::Student(id) => {
                Condition::all().add(enrollment::Column::StudentId.eq(*id))
            }
            EnrollmentFilter::Course(id) => {
                Condition::all().add(enrollment::Column::CourseId.eq(*id))
            }
        }
    }
}

/// Course assignment searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseAssignmentFilter {
    Instructor(i32),
    Course(i32),
}

impl SearchFilter<course_instructor::Entity> for CourseAssignmentFilter {
    fn condition(&self) -> Condition {
        match self {
            CourseAssignmentFilter::Instructor(id) => {
                Condition::all().add(course_instructor::Column::InstructorId.eq(*id))
            }
            CourseAssignmentFilter::Course(id) => {
                Condition::all().add(course_instructor::Column::CourseId.eq(*id))
            }
        }
    }
}

fn lower<C: ColumnTrait>(column: C) -> Expr {
    Expr::expr(Func::lower(Expr::col(column)))
}

/// `%text%`, lower-cased, with LIKE wildcards in `text` matched literally
fn contains_pattern(text: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for ch in text.trim().to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}

// =============================================================================
// Sort orders
// =============================================================================

impl SortOrder<student::Entity> for StudentSort {
    fn apply(self, select: Select<student::Entity>) -> Select<student::Entity> {
        let (column, order) = match self {
            StudentSort::LastName => (student::Column::LastName, Order::Asc),
            StudentSort::LastNameDesc => (student::Column::LastName, Order::Desc),
            StudentSort::FirstName => (student::Column::FirstMidName, Order::Asc),
            StudentSort::FirstNameDesc => (student::Column::FirstMidName, Order::Desc),
            StudentSort::EnrollmentDate => (student::Column::EnrollmentDate, Order::Asc),
            StudentSort::EnrollmentDateDesc => (student::Column::EnrollmentDate, Order::Desc),
        };
        select
            .order_by(column, order)
            .order_by_asc(student::Column::Id)
    }
}

impl SortOrder<course::Entity> for CourseSort {
    fn apply(self, select: Select<course::Entity>) -> Select<course::Entity> {
        let (column, order) = match self {
            CourseSort::Number => (course::Column::Id, Order::Asc),
            CourseSort::NumberDesc => (course::Column::Id, Order::Desc),
            CourseSort::Title => (course::Column::Title, Order::Asc),
            CourseSort::TitleDesc => (course::Column::Title, Order::Desc),
            CourseSort::Credits => (course::Column::Credits, Order::Asc),
            CourseSort::CreditsDesc => (course::Column::Credits, Order::Desc),
        };
        select
            .order_by(column, order)
            .order_by_asc(course::Column::Id)
    }
}

impl SortOrder<instructor::Entity> for InstructorSort {
    fn apply(self, select: Select<instructor::Entity>) -> Select<instructor::Entity> {
        let (column, order) = match self {
            InstructorSort::LastName => (instructor::Column::LastName, Order::Asc),
            InstructorSort::LastNameDesc => (instructor::Column::LastName, Order::Desc),
            InstructorSort::HireDate => (instructor::Column::HireDate, Order::Asc),
            InstructorSort::HireDateDesc => (instructor::Column::HireDate, Order::Desc),
        };
        select
            .order_by(column, order)
            .order_by_asc(instructor::Column::Id)
    }
}

impl SortOrder<department::Entity> for DepartmentSort {
    fn apply(self, select: Select<department::Entity>) -> Select<department::Entity> {
        let (column, order) = match self {
            DepartmentSort::Name => (department::Column::Name, Order::Asc),
            DepartmentSort::NameDesc => (department::Column::Name, Order::Desc),
            DepartmentSort::Budget => (department::Column::Budget, Order::Asc),
            DepartmentSort::BudgetDesc => (department::Column::Budget, Order::Desc),
            DepartmentSort::StartDate => (department::Column::StartDate, Order::Asc),
            DepartmentSort::StartDateDesc => (department::Column::StartDate, Order::Desc),
        };
        select
            .order_by(column, order)
            .order_by_asc(department::Column::Id)
    }
}
