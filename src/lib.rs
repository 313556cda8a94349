//! Contoso University - student records over HTTP
//!
//! Students, courses, instructors and departments, each managed through a
//! controller-style set of list, details, create, edit and delete endpoints
//! backed by a generic repository and a Unit of Work.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities, input structs and view-models
//! - **services**: One service per controller
//! - **infra**: Database, migrations, repositories and the Unit of Work
//! - **api**: HTTP handlers, anti-forgery middleware, and routes
//! - **types**: Shared types (forms, pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Course, Department, Instructor, Student};
pub use errors::{AppError, AppResult};
pub use infra::{Database, Persistence, UnitOfWork};
