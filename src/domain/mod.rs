//! Domain layer - Core business entities and logic
//!
//! Entities, the input structs that carry the fields a client may set, and
//! the view-models returned by each list and details page.

mod sorting;

pub mod course;
pub mod department;
pub mod enrollment;
pub mod instructor;
pub mod report;
pub mod student;

pub use course::{
    Course, CourseDetails, CourseIndex, CourseInput, CourseSort, CreateCourse, UpdateCourse,
};
pub use department::{
    Department, DepartmentDetails, DepartmentForm, DepartmentInput, DepartmentSort,
};
pub use enrollment::{Enrollment, EnrollmentLine, Grade};
pub use instructor::{
    AssignedCourse, CourseAssignments, Instructor, InstructorDetails, InstructorForm,
    InstructorIndex, InstructorInput, InstructorSort, OfficeAssignment,
};
pub use report::{group_by_enrollment_date, EnrollmentDateGroup};
pub use student::{
    Student, StudentDetails, StudentForm, StudentIndex, StudentInput, StudentQuery, StudentSort,
    StudentSortLinks,
};
