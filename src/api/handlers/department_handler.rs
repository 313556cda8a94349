//! Department handlers.

use axum::{
    extract::{Query, State},
    response::{Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::{protected, submitted};
use crate::api::extractors::{BoundForm, EntityId};
use crate::api::AppState;
use crate::domain::{DepartmentDetails, DepartmentInput, DepartmentSort};
use crate::errors::AppResult;
use crate::services::DepartmentFormView;
use crate::types::{Confirmation, Protected};

const INDEX: &str = "/Department";

/// Department list query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DepartmentListQuery {
    /// name, name_desc, budget, budget_desc, date or date_desc
    pub sort_order: Option<String>,
}

/// Create department routes
pub fn department_routes() -> Router<AppState> {
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

/// List departments with their administrators
#[utoipa::path(
    get,
    path = "/Department",
    tag = "Departments",
    params(DepartmentListQuery),
    responses((status = 200, description = "Departments", body = [DepartmentDetails]))
)]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<DepartmentListQuery>,
) -> AppResult<Json<Vec<DepartmentDetails>>> {
    let sort = DepartmentSort::parse(query.sort_order.as_deref());
    Ok(Json(state.departments.index(sort).await?))
}

/// Department with its administrator
#[utoipa::path(
    get,
    path = "/Department/Details/{id}",
    tag = "Departments",
    params(("id" = i32, Path, description = "Department id")),
    responses(
        (status = 200, description = "Department found", body = DepartmentDetails),
        (status = 400, description = "Missing or malformed id"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn details(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<DepartmentDetails>> {
    Ok(Json(state.departments.details(id).await?))
}

/// Empty create form with the administrator dropdown
#[utoipa::path(
    get,
    path = "/Department/Create",
    tag = "Departments",
    responses((status = 200, description = "Empty form with an anti-forgery token"))
)]
pub async fn create_form(
    State(state): State<AppState>,
) -> AppResult<Json<Protected<DepartmentFormView>>> {
    let view = state.departments.create_form().await?;
    protected(&state, view)
}

/// Create a department
#[utoipa::path(
    post,
    path = "/Department/Create",
    tag = "Departments",
    request_body(content = DepartmentInput, content_type = "application/x-www-form-urlencoded"),
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
    BoundForm(input): BoundForm<DepartmentInput>,
) -> AppResult<Response> {
    let outcome = state.departments.create(input).await?;
    submitted(&state, outcome, INDEX)
}

/// Pre-filled edit form
#[utoipa::path(
    get,
    path = "/Department/Edit/{id}",
    tag = "Departments",
    params(("id" = i32, Path, description = "Department id")),
    responses(
        (status = 200, description = "Form with current values"),
        (status = 400, description = "Missing or malformed id"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn edit_form(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Protected<DepartmentFormView>>> {
    let view = state.departments.edit_form(id).await?;
    protected(&state, view)
}

/// Update name, budget, start date and administrator
#[utoipa::path(
    post,
    path = "/Department/Edit/{id}",
    tag = "Departments",
    params(("id" = i32, Path, description = "Department id")),
    request_body(content = DepartmentInput, content_type = "application/x-www-form-urlencoded"),
    security(("antiforgery" = [])),
    responses(
        (status = 303, description = "Updated; redirect to the list"),
        (status = 400, description = "Missing id or anti-forgery token"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Save failed; form returned for a retry"),
        (status = 422, description = "Validation failed; form returned with messages")
    )
)]
pub async fn edit(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    BoundForm(input): BoundForm<DepartmentInput>,
) -> AppResult<Response> {
    let outcome = state.departments.edit(id, input).await?;
    submitted(&state, outcome, INDEX)
}

/// Delete confirmation
#[utoipa::path(
    get,
    path = "/Department/Delete/{id}",
    tag = "Departments",
    params(("id" = i32, Path, description = "Department id")),
    responses(
        (status = 200, description = "Department to delete"),
        (status = 400, description = "Missing or malformed id"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn delete_confirmation(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Protected<Confirmation<DepartmentDetails>>>> {
    let view = state.departments.delete_confirmation(id).await?;
    protected(&state, view)
}

/// Delete a department together with its courses
#[utoipa::path(
    post,
    path = "/Department/Delete/{id}",
    tag = "Departments",
    params(("id" = i32, Path, description = "Department id")),
    security(("antiforgery" = [])),
    responses(
        (status = 303, description = "Deleted; redirect to the list"),
        (status = 400, description = "Missing id or anti-forgery token"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Delete failed; confirmation returned with the message")
    )
)]
pub async fn delete(State(state): State<AppState>, EntityId(id): EntityId) -> AppResult<Response> {
    let outcome = state.departments.delete(id).await?;
    submitted(&state, outcome, INDEX)
}
