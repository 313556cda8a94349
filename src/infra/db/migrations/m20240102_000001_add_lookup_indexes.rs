//! Migration: Index the columns used for name search and department filtering.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_university_tables::{Course, Student};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_student_last_name")
                    .table(Student::Table)
                    .col(Student::LastName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_department_id")
                    .table(Course::Table)
                    .col(Course::DepartmentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_department_id")
                    .table(Course::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_student_last_name")
                    .table(Student::Table)
                    .to_owned(),
            )
            .await
    }
}
