//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    course_handler, department_handler, home_handler, instructor_handler, student_handler,
};
use crate::config::ANTIFORGERY_HEADER;
use crate::domain::{
    AssignedCourse, Course, CourseDetails, CourseInput, Department, DepartmentDetails,
    DepartmentInput, Enrollment, EnrollmentDateGroup, EnrollmentLine, Grade, Instructor,
    InstructorDetails, InstructorInput, OfficeAssignment, Student, StudentDetails, StudentInput,
};
use crate::services::AntiforgeryToken;
use crate::types::{MessageResponse, SelectOption};

/// OpenAPI documentation for Contoso University
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contoso University",
        version = "0.1.0",
        description = "Student, course, instructor and department records",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        home_handler::index,
        home_handler::enrollment,
        home_handler::contact,
        home_handler::antiforgery_token,
        student_handler::index,
        student_handler::details,
        student_handler::create_form,
        student_handler::create,
        student_handler::edit_form,
        student_handler::edit,
        student_handler::delete_confirmation,
        student_handler::delete,
        course_handler::index,
        course_handler::details,
        course_handler::create_form,
        course_handler::create,
        course_handler::edit_form,
        course_handler::edit,
        course_handler::delete_confirmation,
        course_handler::delete,
        instructor_handler::index,
        instructor_handler::details,
        instructor_handler::create_form,
        instructor_handler::create,
        instructor_handler::edit_form,
        instructor_handler::edit,
        instructor_handler::delete_confirmation,
        instructor_handler::delete,
        department_handler::index,
        department_handler::details,
        department_handler::create_form,
        department_handler::create,
        department_handler::edit_form,
        department_handler::edit,
        department_handler::delete_confirmation,
        department_handler::delete,
    ),
    components(
        schemas(
            Student,
            StudentInput,
            StudentDetails,
            Enrollment,
            EnrollmentLine,
            Grade,
            Course,
            CourseInput,
            CourseDetails,
            Instructor,
            InstructorInput,
            InstructorDetails,
            OfficeAssignment,
            AssignedCourse,
            Department,
            DepartmentInput,
            DepartmentDetails,
            EnrollmentDateGroup,
            SelectOption,
            MessageResponse,
            AntiforgeryToken,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Home", description = "Welcome, statistics and anti-forgery tokens"),
        (name = "Students", description = "Student records and enrollments"),
        (name = "Courses", description = "Course catalogue"),
        (name = "Instructors", description = "Instructors, offices and course assignments"),
        (name = "Departments", description = "Departments and their administrators")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for the anti-forgery header
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "antiforgery",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    ANTIFORGERY_HEADER,
                    "Token from a form page or GET /antiforgery/token",
                ))),
            );
        }
    }
}
