//! Form extractor - binds a urlencoded body to an input struct.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use axum_extra::extract::Form;
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Urlencoded form bound to `T`.
///
/// Only the fields declared on `T` are read, so a client cannot set anything
/// else. Repeated keys fill `Vec` fields (`selected_courses=1&selected_courses=2`).
/// Form inputs keep every field as text and default what is left out, so a
/// missing or malformed value reaches the service, which redisplays the form
/// with a message for that field. Only a body that is not a urlencoded form
/// is rejected here.
pub struct BoundForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for BoundForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.to_string()))?;

        Ok(BoundForm(value))
    }
}
