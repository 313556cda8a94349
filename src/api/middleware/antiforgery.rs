//! Anti-forgery middleware.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::ANTIFORGERY_HEADER;
use crate::errors::AppError;

/// Reject state-changing requests that lack a valid anti-forgery token.
///
/// GET, HEAD, OPTIONS and TRACE pass through. Every other method must carry
/// a token issued by the anti-forgery service in the
/// `RequestVerificationToken` header.
pub async fn antiforgery_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_safe(request.method()) {
        return Ok(next.run(request).await);
    }

    let token = request
        .headers()
        .get(ANTIFORGERY_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::InvalidAntiforgeryToken)?;

    state.antiforgery.verify(token)?;

    Ok(next.run(request).await)
}

fn is_safe(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}
