//! Instructor database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Instructor, InstructorForm};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "instructor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub last_name: String,
    pub first_mid_name: String,
    pub hire_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::office_assignment::Entity")]
    OfficeAssignment,
    #[sea_orm(has_many = "super::course_instructor::Entity")]
    CourseInstructors,
    #[sea_orm(has_many = "super::department::Entity")]
    AdministeredDepartments,
}

impl Related<super::office_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OfficeAssignment.def()
    }
}

impl Related<super::course_instructor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseInstructors.def()
    }
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdministeredDepartments.def()
    }
}

// Many-to-many relationship with courses
impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_instructor::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_instructor::Relation::Instructor.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Copy the client-settable name and hire date fields
    pub fn apply(&mut self, form: &InstructorForm) {
        self.last_name = form.last_name.clone();
        self.first_mid_name = form.first_mid_name.clone();
        self.hire_date = form.hire_date;
    }
}

/// New row from a create form
impl From<&InstructorForm> for ActiveModel {
    fn from(form: &InstructorForm) -> Self {
        ActiveModel {
            last_name: Set(form.last_name.clone()),
            first_mid_name: Set(form.first_mid_name.clone()),
            hire_date: Set(form.hire_date),
            ..Default::default()
        }
    }
}

/// Convert database model to domain entity
impl From<Model> for Instructor {
    fn from(model: Model) -> Self {
        Instructor {
            id: model.id,
            last_name: model.last_name,
            first_mid_name: model.first_mid_name,
            hire_date: model.hire_date,
        }
    }
}
