//! Entity id extractor - `/{Entity}/{Action}/{id}` or `?id=`.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::errors::AppError;

/// Id of the entity a details, edit or delete request is about.
///
/// Taken from the `id` path segment, falling back to the `id` query
/// parameter. Missing or malformed ids are rejected with 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i32);

#[derive(Deserialize)]
struct IdQuery {
    id: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let from_path = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|Path(mut params)| params.remove("id"));

        let raw = match from_path {
            Some(raw) => Some(raw),
            None => Query::<IdQuery>::from_request_parts(parts, state)
                .await
                .ok()
                .and_then(|Query(query)| query.id),
        };

        let raw = raw
            .filter(|raw| !raw.trim().is_empty())
            .ok_or_else(|| AppError::bad_request("An id is required"))?;

        raw.trim()
            .parse()
            .map(EntityId)
            .map_err(|_| AppError::bad_request(format!("'{}' is not a valid id", raw)))
    }
}
