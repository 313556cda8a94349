//! Home pages and token issuance.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::domain::EnrollmentDateGroup;
use crate::errors::AppResult;
use crate::services::AntiforgeryToken;
use crate::types::MessageResponse;

/// Create home routes
pub fn home_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/Home", get(index))
        .route("/Home/Index", get(index))
        .route("/Home/Enrollment", get(enrollment))
        .route("/Home/About", get(enrollment))
        .route("/Home/Contact", get(contact))
        .route("/antiforgery/token", get(antiforgery_token))
}

/// Welcome page
#[utoipa::path(
    get,
    path = "/",
    tag = "Home",
    responses((status = 200, description = "Welcome message", body = MessageResponse))
)]
pub async fn index() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to Contoso University"))
}

/// Student body statistics: students per enrollment date
#[utoipa::path(
    get,
    path = "/Home/Enrollment",
    tag = "Home",
    responses(
        (status = 200, description = "Enrollment dates, oldest first", body = [EnrollmentDateGroup])
    )
)]
pub async fn enrollment(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EnrollmentDateGroup>>> {
    Ok(Json(state.reports.enrollment_dates().await?))
}

/// Contact page
#[utoipa::path(
    get,
    path = "/Home/Contact",
    tag = "Home",
    responses((status = 200, description = "Contact message", body = MessageResponse))
)]
pub async fn contact() -> Json<MessageResponse> {
    Json(MessageResponse::new("Contact the Contoso University registrar's office"))
}

/// Fresh anti-forgery token for clients that post without a form page
#[utoipa::path(
    get,
    path = "/antiforgery/token",
    tag = "Home",
    responses(
        (status = 200, description = "Token to echo on the next post", body = AntiforgeryToken)
    )
)]
pub async fn antiforgery_token(State(state): State<AppState>) -> AppResult<Json<AntiforgeryToken>> {
    Ok(Json(state.antiforgery.issue()?))
}
