//! Shared types used across handlers and services.

mod form;
mod pagination;
mod response;

pub use form::{
    selected_id, Confirmation, FormBinder, FormView, Lookups, ModelErrors, SelectOption, Submission,
};
pub use pagination::{PageRequest, Paginated, PaginationMeta};
pub use response::{submission_response, MessageResponse, Protected};
