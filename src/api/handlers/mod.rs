//! HTTP request handlers.
//!
//! One module per controller. Form pages are returned together with a fresh
//! anti-forgery token; submitted forms answer with a redirect to the list or
//! with the form again.

pub mod course_handler;
pub mod department_handler;
pub mod home_handler;
pub mod instructor_handler;
pub mod student_handler;

pub use course_handler::course_routes;
pub use department_handler::department_routes;
pub use home_handler::home_routes;
pub use instructor_handler::instructor_routes;
pub use student_handler::student_routes;

use axum::response::{Json, Response};
use serde::Serialize;

use crate::api::AppState;
use crate::errors::AppResult;
use crate::types::{submission_response, Protected, Submission};

/// Lenient numeric query parameter: anything unparsable counts as absent
pub(crate) fn parse_param<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

fn antiforgery_token(state: &AppState) -> AppResult<String> {
    Ok(state.antiforgery.issue()?.token)
}

/// A form page that will be posted back
pub(crate) fn protected<V: Serialize>(state: &AppState, view: V) -> AppResult<Json<Protected<V>>> {
    Ok(Json(Protected::new(view, antiforgery_token(state)?)))
}

/// Answer a submitted form; on success redirect to `index`
pub(crate) fn submitted<V: Serialize>(
    state: &AppState,
    submission: Submission<V>,
    index: &str,
) -> AppResult<Response> {
    submission_response(submission, index, || antiforgery_token(state))
}
