//! Student handlers.

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
use crate::domain::{Student, StudentDetails, StudentIndex, StudentInput, StudentQuery};
use crate::errors::AppResult;
use crate::services::StudentFormView;
use crate::types::{Confirmation, Protected};

const INDEX: &str = "/Student";

/// Student list query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StudentListQuery {
    /// lastname, lastname_desc, firstname, firstname_desc, date or date_desc
    pub sort_order: Option<String>,
    /// Search carried over from the previous page
    pub current_filter: Option<String>,
    /// Newly submitted search; restarts at page 1
    pub search_value: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
}

/// Create student routes
pub fn student_routes() -> Router<AppState> {
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

/// List students, five per page
#[utoipa::path(
    get,
    path = "/Student",
    tag = "Students",
    params(StudentListQuery),
    responses(
        (status = 200, description = "One page of students with the sort links")
    )
)]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<StudentListQuery>,
) -> AppResult<Json<StudentIndex>> {
    let query = StudentQuery::resolve(
        query.sort_order.as_deref(),
        query.current_filter,
        query.search_value,
        parse_param(query.page.as_deref()),
    );

    Ok(Json(state.students.index(query).await?))
}

/// Student with enrollments
#[utoipa::path(
    get,
    path = "/Student/Details/{id}",
    tag = "Students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student found", body = StudentDetails),
        (status = 400, description = "Missing or malformed id"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn details(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<StudentDetails>> {
    Ok(Json(state.students.details(id).await?))
}

/// Empty create form
#[utoipa::path(
    get,
    path = "/Student/Create",
    tag = "Students",
    responses((status = 200, description = "Empty form with an anti-forgery token"))
)]
pub async fn create_form(
    State(state): State<AppState>,
) -> AppResult<Json<Protected<StudentFormView>>> {
    let view = state.students.create_form().await?;
    protected(&state, view)
}

/// Create a student
#[utoipa::path(
    post,
    path = "/Student/Create",
    tag = "Students",
    request_body(content = StudentInput, content_type = "application/x-www-form-urlencoded"),
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
    BoundForm(input): BoundForm<StudentInput>,
) -> AppResult<Response> {
    let outcome = state.students.create(input).await?;
    submitted(&state, outcome, INDEX)
}

/// Pre-filled edit form
#[utoipa::path(
    get,
    path = "/Student/Edit/{id}",
    tag = "Students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Form with current values"),
        (status = 400, description = "Missing or malformed id"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn edit_form(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Protected<StudentFormView>>> {
    let view = state.students.edit_form(id).await?;
    protected(&state, view)
}

/// Update a student's names and enrollment date
#[utoipa::path(
    post,
    path = "/Student/Edit/{id}",
    tag = "Students",
    params(("id" = i32, Path, description = "Student id")),
    request_body(content = StudentInput, content_type = "application/x-www-form-urlencoded"),
    security(("antiforgery" = [])),
    responses(
        (status = 303, description = "Updated; redirect to the list"),
        (status = 400, description = "Missing id or anti-forgery token"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Save failed; form returned for a retry"),
        (status = 422, description = "Validation failed; form returned with messages")
    )
)]
pub async fn edit(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    BoundForm(input): BoundForm<StudentInput>,
) -> AppResult<Response> {
    let outcome = state.students.edit(id, input).await?;
    submitted(&state, outcome, INDEX)
}

/// Delete confirmation
#[utoipa::path(
    get,
    path = "/Student/Delete/{id}",
    tag = "Students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student to delete"),
        (status = 400, description = "Missing or malformed id"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn delete_confirmation(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Protected<Confirmation<Student>>>> {
    let view = state.students.delete_confirmation(id).await?;
    protected(&state, view)
}

/// Delete a student and their enrollments
#[utoipa::path(
    post,
    path = "/Student/Delete/{id}",
    tag = "Students",
    params(("id" = i32, Path, description = "Student id")),
    security(("antiforgery" = [])),
    responses(
        (status = 303, description = "Deleted; redirect to the list"),
        (status = 400, description = "Missing id or anti-forgery token"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Delete failed; confirmation returned with the message")
    )
)]
pub async fn delete(State(state): State<AppState>, EntityId(id): EntityId) -> AppResult<Response> {
    let outcome = state.students.delete(id).await?;
    submitted(&state, outcome, INDEX)
}
