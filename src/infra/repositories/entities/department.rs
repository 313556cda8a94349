//! Department database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Department, DepartmentForm};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "department")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub budget: Decimal,
    pub start_date: Date,
    /// Administrator; NULL when the department has none
    pub instructor_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::instructor::Entity",
        from = "Column::InstructorId",
        to = "super::instructor::Column::Id"
    )]
    Administrator,
    #[sea_orm(has_many = "super::course::Entity")]
    Courses,
}

impl Related<super::instructor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Administrator.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Copy the client-settable fields
    pub fn apply(&mut self, form: &DepartmentForm) {
        self.name = form.name.clone();
        self.budget = form.budget;
        self.start_date = form.start_date;
        self.instructor_id = form.administrator_id;
    }
}

/// New row from a create form
impl From<&DepartmentForm> for ActiveModel {
    fn from(form: &DepartmentForm) -> Self {
        ActiveModel {
            name: Set(form.name.clone()),
            budget: Set(form.budget),
            start_date: Set(form.start_date),
            instructor_id: Set(form.administrator_id),
            ..Default::default()
        }
    }
}

/// Convert database model to domain entity
impl From<Model> for Department {
    fn from(model: Model) -> Self {
        Department {
            id: model.id,
            name: model.name,
            budget: model.budget,
            start_date: model.start_date,
            administrator_id: model.instructor_id,
        }
    }
}
