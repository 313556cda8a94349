//! Custom request extractors.

mod bound_form;
mod entity_id;

pub use bound_form::BoundForm;
pub use entity_id::EntityId;
