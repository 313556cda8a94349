use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::form::Submission;
use crate::errors::AppResult;

/// A view-model that will be posted back, paired with the anti-forgery
/// token the client must echo in the `RequestVerificationToken` header.
#[derive(Debug, Serialize)]
pub struct Protected<V: Serialize> {
    #[serde(flatten)]
    pub view: V,
    pub antiforgery_token: String,
}

impl<V: Serialize> Protected<V> {
    pub fn new(view: V, antiforgery_token: impl Into<String>) -> Self {
        Self {
            view,
            antiforgery_token: antiforgery_token.into(),
        }
    }
}

/// Message-only response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response for a POSTed form: 303 to `index` on success, otherwise the form
/// again with 422 (validation) or 409 (commit failure).
pub fn submission_response<V: Serialize>(
    submission: Submission<V>,
    index: &str,
    antiforgery_token: impl FnOnce() -> AppResult<String>,
) -> AppResult<Response> {
    let response = match submission {
        Submission::Saved => Redirect::to(index).into_response(),
        Submission::Invalid(view) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(Protected::new(view, antiforgery_token()?)),
        )
            .into_response(),
        Submission::SaveFailed(view) => (
            StatusCode::CONFLICT,
            Json(Protected::new(view, antiforgery_token()?)),
        )
            .into_response(),
    };
    Ok(response)
}
