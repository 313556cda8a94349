//! Shared fixtures: an in-memory SQLite database with the schema applied,
//! the real services on top of it, and a few seeding helpers.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use contoso_university::config::Config;
use contoso_university::domain::{
    CreateCourse, DepartmentForm, InstructorForm, InstructorInput, StudentForm, StudentInput,
};
use contoso_university::infra::repositories::entities::{
    course, department, enrollment, instructor, student,
};
use contoso_university::infra::{Database, Migrator, Persistence, RepositoryScope};
use contoso_university::services::Services;

pub const TEST_SECRET: &str = "test-antiforgery-secret-at-least-32-chars";

pub fn test_config() -> Config {
    Config::new("sqlite::memory:", TEST_SECRET)
}

/// Fresh in-memory database with every migration applied.
///
/// A single pooled connection keeps every query on the same in-memory file.
pub async fn test_connection() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let connection = SeaDatabase::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&connection, None)
        .await
        .expect("Failed to run migrations");
    connection
}

/// Everything a test needs to drive the services and check the tables
pub struct TestContext {
    pub connection: DatabaseConnection,
    pub uow: Persistence,
    pub services: Services,
    pub database: Arc<Database>,
}

impl TestContext {
    pub async fn new() -> Self {
        let connection = test_connection().await;
        Self {
            uow: Persistence::new(connection.clone()),
            services: Services::from_connection(connection.clone(), test_config()),
            database: Arc::new(Database::from_connection(connection.clone())),
            connection,
        }
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn student_form(last_name: &str, first_mid_name: &str, enrolled: NaiveDate) -> StudentForm {
    StudentForm {
        last_name: last_name.to_string(),
        first_mid_name: first_mid_name.to_string(),
        enrollment_date: enrolled,
    }
}

/// Student form text as a browser would post it
pub fn student_input(last_name: &str, first_mid_name: &str, enrolled: NaiveDate) -> StudentInput {
    StudentInput {
        last_name: last_name.to_string(),
        first_mid_name: first_mid_name.to_string(),
        enrollment_date: enrolled.to_string(),
    }
}

/// Instructor form text with one `selected_courses` entry per course
pub fn instructor_input(last_name: &str, office: Option<&str>, courses: &[i32]) -> InstructorInput {
    InstructorInput {
        last_name: last_name.to_string(),
        first_mid_name: "Kim".to_string(),
        hire_date: "2002-07-06".to_string(),
        office_location: office.map(str::to_string),
        selected_courses: courses.iter().map(i32::to_string).collect(),
    }
}

pub async fn seed_student(uow: &Persistence, last_name: &str, first_mid_name: &str) -> i32 {
    uow.students()
        .add(student::ActiveModel::from(&student_form(
            last_name,
            first_mid_name,
            date(2005, 9, 1),
        )))
        .await
        .expect("Failed to seed student")
        .id
}

pub async fn seed_instructor(uow: &Persistence, last_name: &str) -> i32 {
    uow.instructors()
        .add(instructor::ActiveModel::from(&InstructorForm {
            last_name: last_name.to_string(),
            first_mid_name: "Kim".to_string(),
            hire_date: date(2002, 7, 6),
            office_location: None,
            selected_courses: Default::default(),
        }))
        .await
        .expect("Failed to seed instructor")
        .id
}

pub async fn seed_department(uow: &Persistence, name: &str, administrator_id: Option<i32>) -> i32 {
    uow.departments()
        .add(department::ActiveModel::from(&DepartmentForm {
            name: name.to_string(),
            budget: Decimal::new(350_000, 0),
            start_date: date(2007, 9, 1),
            administrator_id,
        }))
        .await
        .expect("Failed to seed department")
        .id
}

pub async fn seed_course(uow: &Persistence, number: i32, title: &str, department_id: i32) -> i32 {
    uow.courses()
        .add(course::ActiveModel::from(&CreateCourse {
            course_id: number,
            title: title.to_string(),
            credits: 3,
            department_id,
        }))
        .await
        .expect("Failed to seed course")
        .id
}

pub async fn seed_enrollment(
    uow: &Persistence,
    student_id: i32,
    course_id: i32,
    grade: Option<&str>,
) {
    use sea_orm::Set;

    uow.enrollments()
        .add(enrollment::ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            grade: Set(grade.map(str::to_string)),
            ..Default::default()
        })
        .await
        .expect("Failed to seed enrollment");
}
