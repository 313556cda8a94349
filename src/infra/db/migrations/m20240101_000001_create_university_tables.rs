//! Migration: Create the university tables.
//!
//! Courses keep the user-chosen course number as their key. Deleting a
//! department removes its courses; deleting a student or course removes its
//! enrollments; deleting an instructor removes the office and course
//! assignments. A department's administrator reference is not cascaded.

use sea_orm_migration::prelude::*;

use crate::config::MAX_NAME_LENGTH;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Instructor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Instructor::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Instructor::LastName)
                            .string_len(MAX_NAME_LENGTH)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Instructor::FirstMidName)
                            .string_len(MAX_NAME_LENGTH)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Instructor::HireDate).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Department::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Department::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Department::Name)
                            .string_len(MAX_NAME_LENGTH)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Department::Budget).decimal_len(16, 4).not_null())
                    .col(ColumnDef::new(Department::StartDate).date().not_null())
                    .col(ColumnDef::new(Department::InstructorId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_department_instructor")
                            .from(Department::Table, Department::InstructorId)
                            .to(Instructor::Table, Instructor::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Course::Id).integer().not_null().primary_key())
                    .col(
                        ColumnDef::new(Course::Title)
                            .string_len(MAX_NAME_LENGTH)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Course::Credits).integer().not_null())
                    .col(ColumnDef::new(Course::DepartmentId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_department")
                            .from(Course::Table, Course::DepartmentId)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Student::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Student::LastName)
                            .string_len(MAX_NAME_LENGTH)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Student::FirstMidName)
                            .string_len(MAX_NAME_LENGTH)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Student::EnrollmentDate).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Enrollment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollment::CourseId).integer().not_null())
                    .col(ColumnDef::new(Enrollment::StudentId).integer().not_null())
                    .col(ColumnDef::new(Enrollment::Grade).string_len(1).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollment_course")
                            .from(Enrollment::Table, Enrollment::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollment_student")
                            .from(Enrollment::Table, Enrollment::StudentId)
                            .to(Student::Table, Student::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OfficeAssignment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OfficeAssignment::InstructorId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OfficeAssignment::Location)
                            .string_len(MAX_NAME_LENGTH)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_office_assignment_instructor")
                            .from(OfficeAssignment::Table, OfficeAssignment::InstructorId)
                            .to(Instructor::Table, Instructor::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseInstructor::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CourseInstructor::CourseId).integer().not_null())
                    .col(
                        ColumnDef::new(CourseInstructor::InstructorId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CourseInstructor::CourseId)
                            .col(CourseInstructor::InstructorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_instructor_course")
                            .from(CourseInstructor::Table, CourseInstructor::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_instructor_instructor")
                            .from(CourseInstructor::Table, CourseInstructor::InstructorId)
                            .to(Instructor::Table, Instructor::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseInstructor::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OfficeAssignment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Department::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Instructor::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Student {
    Table,
    Id,
    LastName,
    FirstMidName,
    EnrollmentDate,
}

#[derive(Iden)]
pub(super) enum Course {
    Table,
    Id,
    Title,
    Credits,
    DepartmentId,
}

#[derive(Iden)]
enum Enrollment {
    Table,
    Id,
    CourseId,
    StudentId,
    Grade,
}

#[derive(Iden)]
enum Instructor {
    Table,
    Id,
    LastName,
    FirstMidName,
    HireDate,
}

#[derive(Iden)]
enum OfficeAssignment {
    Table,
    InstructorId,
    Location,
}

#[derive(Iden)]
enum CourseInstructor {
    Table,
    CourseId,
    InstructorId,
}

#[derive(Iden)]
enum Department {
    Table,
    Id,
    Name,
    Budget,
    StartDate,
    InstructorId,
}
