//! Student database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Student, StudentForm};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub last_name: String,
    pub first_mid_name: String,
    pub enrollment_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Copy the client-settable fields; id and enrollments are untouched
    pub fn apply(&mut self, form: &StudentForm) {
        self.last_name = form.last_name.clone();
        self.first_mid_name = form.first_mid_name.clone();
        self.enrollment_date = form.enrollment_date;
    }
}

/// New row from a create form
impl From<&StudentForm> for ActiveModel {
    fn from(form: &StudentForm) -> Self {
        ActiveModel {
            last_name: Set(form.last_name.clone()),
            first_mid_name: Set(form.first_mid_name.clone()),
            enrollment_date: Set(form.enrollment_date),
            ..Default::default()
        }
    }
}

/// Convert database model to domain entity
impl From<Model> for Student {
    fn from(model: Model) -> Self {
        Student {
            id: model.id,
            last_name: model.last_name,
            first_mid_name: model.first_mid_name,
            enrollment_date: model.enrollment_date,
        }
    }
}
