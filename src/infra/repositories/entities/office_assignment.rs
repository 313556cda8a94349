//! Office assignment database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::OfficeAssignment;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "office_assignment")]
pub struct Model {
    /// Also the owning instructor's id; one office per instructor
    #[sea_orm(primary_key, auto_increment = false)]
    pub instructor_id: i32,
    pub location: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::instructor::Entity",
        from = "Column::InstructorId",
        to = "super::instructor::Column::Id"
    )]
    Instructor,
}

impl Related<super::instructor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn located(instructor_id: i32, location: impl Into<String>) -> Self {
        ActiveModel {
            instructor_id: Set(instructor_id),
            location: Set(location.into()),
        }
    }
}

/// Convert database model to domain entity
impl From<Model> for OfficeAssignment {
    fn from(model: Model) -> Self {
        OfficeAssignment {
            instructor_id: model.instructor_id,
            location: model.location,
        }
    }
}
