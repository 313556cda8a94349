//! Application services layer - Use cases and business logic.
//!
//! One service per controller. Each service turns a request into a
//! view-model: lists and details, empty or pre-filled forms, and the outcome
//! of a submitted form. They depend on the Unit of Work for repository access
//! and transaction management.

mod antiforgery_service;
pub mod container;
mod course_service;
mod department_service;
mod instructor_service;
mod lookups;
mod outcome;
mod report_service;
mod student_service;

// Service Container
pub use container::{parallel, ServiceContainer, Services};

// Service traits and implementations
pub use antiforgery_service::{Antiforgery, AntiforgeryService, AntiforgeryToken, Claims};
pub use course_service::{CourseFormView, CourseManager, CourseService};
pub use department_service::{DepartmentFormView, DepartmentManager, DepartmentService};
pub use instructor_service::{InstructorFormView, InstructorManager, InstructorService};
pub use report_service::{ReportManager, ReportService};
pub use student_service::{StudentFormView, StudentManager, StudentService};

#[cfg(any(test, feature = "test-utils"))]
pub use antiforgery_service::MockAntiforgeryService;
#[cfg(any(test, feature = "test-utils"))]
pub use course_service::MockCourseService;
#[cfg(any(test, feature = "test-utils"))]
pub use department_service::MockDepartmentService;
#[cfg(any(test, feature = "test-utils"))]
pub use instructor_service::MockInstructorService;
#[cfg(any(test, feature = "test-utils"))]
pub use report_service::MockReportService;
#[cfg(any(test, feature = "test-utils"))]
pub use student_service::MockStudentService;
