//! Course database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Course, CreateCourse, UpdateCourse};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "course")]
pub struct Model {
    /// Course number, assigned by the user
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub title: String,
    pub credits: i32,
    pub department_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id"
    )]
    Department,
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::course_instructor::Entity")]
    CourseInstructors,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::course_instructor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseInstructors.def()
    }
}

// Many-to-many relationship with instructors
impl Related<super::instructor::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_instructor::Relation::Instructor.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_instructor::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Copy the client-settable fields; the course number never changes
    pub fn apply(&mut self, form: &UpdateCourse) {
        self.title = form.title.clone();
        self.credits = form.credits;
        self.department_id = form.department_id;
    }
}

/// New row from a create form
impl From<&CreateCourse> for ActiveModel {
    fn from(form: &CreateCourse) -> Self {
        ActiveModel {
            id: Set(form.course_id),
            title: Set(form.title.clone()),
            credits: Set(form.credits),
            department_id: Set(form.department_id),
        }
    }
}

/// Convert database model to domain entity
impl From<Model> for Course {
    fn from(model: Model) -> Self {
        Course {
            id: model.id,
            title: model.title,
            credits: model.credits,
            department_id: model.department_id,
        }
    }
}
