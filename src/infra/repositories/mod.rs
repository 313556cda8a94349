//! Repository layer - Data access abstraction
//!
//! One generic [`Repository`] serves every table. Searches and orderings are
//! expressed with the filter enums and sort orders in [`query`].

mod base;
pub mod entities;
pub mod query;

pub use base::{EntityOf, Listing, ModelOf, Repository};
pub use query::{
    CourseAssignmentFilter, CourseFilter, DepartmentFilter, EnrollmentFilter, SearchFilter,
    SortOrder, StudentFilter,
};
