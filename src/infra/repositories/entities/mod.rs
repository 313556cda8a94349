//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod course;
pub mod course_instructor;
pub mod department;
pub mod enrollment;
pub mod instructor;
pub mod office_assignment;
pub mod student;
