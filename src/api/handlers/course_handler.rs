//! Course handlers.

use axum::{
    extract::{Query, State},
    response::{Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::{parse_param, protected, submitted};
use crate::api::extractors::{BoundForm, EntityId};
use crate::api::AppState;
use crate::domain::{CourseDetails, CourseIndex, CourseInput, CourseSort};
use crate::errors::AppResult;
use crate::services::CourseFormView;
use crate::types::{Confirmation, Protected};

const INDEX: &str = "/Course";

/// Course list query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CourseListQuery {
    /// Only courses of this department
    pub department_id: Option<String>,
    /// number, number_desc, title, title_desc, credits or credits_desc
    pub sort_order: Option<String>,
}

/// Create course routes
pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/Index", get(index))
        .route("/Details", get(details))
        .route("/Details/:id", get(details))
        .route("/Create", get(create_form).post(create))
        .route("/Edit", get(edit_form).post(edit))
        .route("/Edit/:id", get(edit_form).post(edit))
        .route("/Delete", get(delete_confirmation).post(delete))
        .route("/Delete/:id", get(delete_confirmation).post(delete))
}

/// List courses, optionally for one department
#[utoipa::path(
    get,
    path = "/Course",
    tag = "Courses",
    params(CourseListQuery),
    responses((status = 200, description = "Courses with the department dropdown"))
)]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> AppResult<Json<CourseIndex>> {
    let department_id = parse_param(query.department_id.as_deref());
    let sort = CourseSort::parse(query.sort_order.as_deref());

    Ok(Json(state.courses.index(department_id, sort).await?))
}

/// Course with its department
#[utoipa::path(
    get,
    path = "/Course/Details/{id}",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course number")),
    responses(
        (status = 200, description = "Course found", body = CourseDetails),
        (status = 400, description = "Missing or malformed id"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn details(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<CourseDetails>> {
    Ok(Json(state.courses.details(id).await?))
}

/// Empty create form with the department dropdown
#[utoipa::path(
    get,
    path = "/Course/Create",
    tag = "Courses",
    responses((status = 200, description = "Empty form with an anti-forgery token"))
)]
pub async fn create_form(
    State(state): State<AppState>,
) -> AppResult<Json<Protected<CourseFormView>>> {
    let view = state.courses.create_form().await?;
    protected(&state, view)
}

/// Create a course under a user-chosen course number
#[utoipa::path(
    post,
    path = "/Course/Create",
    tag = "Courses",
    request_body(content = CourseInput, content_type = "application/x-www-form-urlencoded"),
    security(("antiforgery" = [])),
    responses(
        (status = 303, description = "Created; redirect to the list"),
        (status = 400, description = "Missing or invalid anti-forgery token"),
        (status = 409, description = "Save failed; form returned for a retry"),
        (status = 422, description = "Validation failed; form returned with messages")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    BoundForm(input): BoundForm<CourseInput>,
) -> AppResult<Response> {
    let outcome = state.courses.create(input).await?;
    submitted(&state, outcome, INDEX)
}

/// Pre-filled edit form
#[utoipa::path(
    get,
    path = "/Course/Edit/{id}",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course number")),
    responses(
        (status = 200, description = "Form with current values"),
        (status = 400, description = "Missing or malformed id"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn edit_form(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Protected<CourseFormView>>> {
    let view = state.courses.edit_form(id).await?;
    protected(&state, view)
}

/// Update title, credits and department; the course number is fixed
#[utoipa::path(
    post,
    path = "/Course/Edit/{id}",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course number")),
    request_body(content = CourseInput, content_type = "application/x-www-form-urlencoded"),
    security(("antiforgery" = [])),
    responses(
        (status = 303, description = "Updated; redirect to the list"),
        (status = 400, description = "Missing id or anti-forgery token"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Save failed; form returned for a retry"),
        (status = 422, description = "Validation failed; form returned with messages")
    )
)]
pub async fn edit(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    BoundForm(input): BoundForm<CourseInput>,
) -> AppResult<Response> {
    let outcome = state.courses.edit(id, input).await?;
    submitted(&state, outcome, INDEX)
}

/// Delete confirmation
#[utoipa::path(
    get,
    path = "/Course/Delete/{id}",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course number")),
    responses(
        (status = 200, description = "Course to delete"),
        (status = 400, description = "Missing or malformed id"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn delete_confirmation(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Protected<Confirmation<CourseDetails>>>> {
    let view = state.courses.delete_confirmation(id).await?;
    protected(&state, view)
}

/// Delete a course with its enrollments and instructor assignments
#[utoipa::path(
    post,
    path = "/Course/Delete/{id}",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course number")),
    security(("antiforgery" = [])),
    responses(
        (status = 303, description = "Deleted; redirect to the list"),
        (status = 400, description = "Missing id or anti-forgery token"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Delete failed; confirmation returned with the message")
    )
)]
pub async fn delete(State(state): State<AppState>, EntityId(id): EntityId) -> AppResult<Response> {
    let outcome = state.courses.delete(id).await?;
    submitted(&state, outcome, INDEX)
}
