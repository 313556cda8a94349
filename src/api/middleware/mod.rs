//! API middleware.

mod antiforgery;

pub use antiforgery::antiforgery_middleware;
