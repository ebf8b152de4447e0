//! JSON extractor for endpoints where an absent body is a domain condition.

use crate::errors::AppError;
use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Json, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Validated JSON body that may be missing.
///
/// An empty (or whitespace-only) body and a literal `null` both yield `None`, so the
/// handler can hand the absence to the service layer instead of failing in extraction.
/// Anything else must be valid JSON with a JSON content type and must pass `Validate`.
/// The body is buffered under the router's `DefaultBodyLimit`; larger bodies get 413.
///
/// ```ignore
/// async fn update(IdPath(id): IdPath<i32>, OptionalValidatedJson(dto): OptionalValidatedJson<ItemDto>) { .. }
/// ```
pub struct OptionalValidatedJson<T>(pub Option<T>);

impl<T, S> FromRequest<S> for OptionalValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let bytes = Bytes::from_request(Request::from_parts(parts.clone(), body), state)
            .await
            .map_err(|e| match e.status() {
                StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(e.body_text()),
                _ => AppError::InvalidArgument(format!(
                    "Failed to read request body: {}",
                    e.body_text()
                )),
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalValidatedJson(None));
        }

        let req = Request::from_parts(parts, Body::from(bytes));
        let Json(data) = Json::<Option<T>>::from_request(req, state).await?;

        if let Some(value) = &data {
            value.validate()?;
        }

        Ok(OptionalValidatedJson(data))
    }
}
