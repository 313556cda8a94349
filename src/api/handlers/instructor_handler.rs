//! Instructor handlers.

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
use crate::domain::{InstructorDetails, InstructorIndex, InstructorInput, InstructorSort};
use crate::errors::AppResult;
use crate::services::InstructorFormView;
use crate::types::{Confirmation, Protected};

const INDEX: &str = "/Instructor";

/// Instructor list query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InstructorListQuery {
    /// Selected instructor whose courses are listed as well
    pub id: Option<String>,
    /// lastname, lastname_desc, hiredate or hiredate_desc
    pub sort_order: Option<String>,
}

/// Create instructor routes
pub fn instructor_routes() -> Router<AppState> {
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

/// List instructors with offices and courses
#[utoipa::path(
    get,
    path = "/Instructor",
    tag = "Instructors",
    params(InstructorListQuery),
    responses(
        (status = 200, description = "Instructors, plus the selected instructor's courses"),
        (status = 404, description = "Selected instructor not found")
    )
)]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<InstructorListQuery>,
) -> AppResult<Json<InstructorIndex>> {
    let selected = parse_param(query.id.as_deref());
    let sort = InstructorSort::parse(query.sort_order.as_deref());

    Ok(Json(state.instructors.index(selected, sort).await?))
}

/// Instructor with office and courses
#[utoipa::path(
    get,
    path = "/Instructor/Details/{id}",
    tag = "Instructors",
    params(("id" = i32, Path, description = "Instructor id")),
    responses(
        (status = 200, description = "Instructor found", body = InstructorDetails),
        (status = 400, description = "Missing or malformed id"),
        (status = 404, description = "Instructor not found")
    )
)]
pub async fn details(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<InstructorDetails>> {
    Ok(Json(state.instructors.details(id).await?))
}

/// Empty create form with the course checklist
#[utoipa::path(
    get,
    path = "/Instructor/Create",
    tag = "Instructors",
    responses((status = 200, description = "Empty form with an anti-forgery token"))
)]
pub async fn create_form(
    State(state): State<AppState>,
) -> AppResult<Json<Protected<InstructorFormView>>> {
    let view = state.instructors.create_form().await?;
    protected(&state, view)
}

/// Create an instructor with an optional office and courses
#[utoipa::path(
    post,
    path = "/Instructor/Create",
    tag = "Instructors",
    request_body(content = InstructorInput, content_type = "application/x-www-form-urlencoded"),
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
    BoundForm(input): BoundForm<InstructorInput>,
) -> AppResult<Response> {
    let outcome = state.instructors.create(input).await?;
    submitted(&state, outcome, INDEX)
}

/// Pre-filled edit form
#[utoipa::path(
    get,
    path = "/Instructor/Edit/{id}",
    tag = "Instructors",
    params(("id" = i32, Path, description = "Instructor id")),
    responses(
        (status = 200, description = "Form with current values"),
        (status = 400, description = "Missing or malformed id"),
        (status = 404, description = "Instructor not found")
    )
)]
pub async fn edit_form(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Protected<InstructorFormView>>> {
    let view = state.instructors.edit_form(id).await?;
    protected(&state, view)
}

/// Update an instructor, its office and the courses it teaches
#[utoipa::path(
    post,
    path = "/Instructor/Edit/{id}",
    tag = "Instructors",
    params(("id" = i32, Path, description = "Instructor id")),
    request_body(content = InstructorInput, content_type = "application/x-www-form-urlencoded"),
    security(("antiforgery" = [])),
    responses(
        (status = 303, description = "Updated; redirect to the list"),
        (status = 400, description = "Missing id or anti-forgery token"),
        (status = 404, description = "Instructor not found"),
        (status = 409, description = "Save failed; form returned for a retry"),
        (status = 422, description = "Validation failed; form returned with messages")
    )
)]
pub async fn edit(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    BoundForm(input): BoundForm<InstructorInput>,
) -> AppResult<Response> {
    let outcome = state.instructors.edit(id, input).await?;
    submitted(&state, outcome, INDEX)
}

/// Delete confirmation
#[utoipa::path(
    get,
    path = "/Instructor/Delete/{id}",
    tag = "Instructors",
    params(("id" = i32, Path, description = "Instructor id")),
    responses(
        (status = 200, description = "Instructor to delete"),
        (status = 400, description = "Missing or malformed id"),
        (status = 404, description = "Instructor not found")
    )
)]
pub async fn delete_confirmation(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Protected<Confirmation<InstructorDetails>>>> {
    let view = state.instructors.delete_confirmation(id).await?;
    protected(&state, view)
}

/// Delete an instructor, releasing its departments, office and courses
#[utoipa::path(
    post,
    path = "/Instructor/Delete/{id}",
    tag = "Instructors",
    params(("id" = i32, Path, description = "Instructor id")),
    security(("antiforgery" = [])),
    responses(
        (status = 303, description = "Deleted; redirect to the list"),
        (status = 400, description = "Missing id or anti-forgery token"),
        (status = 404, description = "Instructor not found"),
        (status = 409, description = "Delete failed; confirmation returned with the message")
    )
)]
pub async fn delete(State(state): State<AppState>, EntityId(id): EntityId) -> AppResult<Response> {
    let outcome = state.instructors.delete(id).await?;
    submitted(&state, outcome, INDEX)
}
