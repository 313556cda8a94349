//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and migrations
//! - Entities and the generic repository
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{Listing, Repository};
pub use unit_of_work::{Persistence, RepositoryScope, TransactionContext, UnitOfWork};
