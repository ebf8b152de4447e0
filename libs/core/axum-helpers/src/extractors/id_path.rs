//! Typed path identifier extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::str::FromStr;

/// Single path parameter parsed into `T`.
///
/// A segment that does not parse (e.g. `abc` for an integer id) is rejected with
/// 400 before the handler runs. Range checks stay with the service layer.
///
/// ```ignore
/// async fn get_item(IdPath(id): IdPath<i32>) -> String {
///     format!("Item ID: {}", id)
/// }
///
/// let app = Router::new().route("/items/{id}", get(get_item));
/// ```
pub struct IdPath<T>(pub T);

impl<T, S> FromRequestParts<S> for IdPath<T>
where
    T: FromStr + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidPathParam(e.body_text()))?;

        raw.parse()
            .map(IdPath)
            .map_err(|_| AppError::InvalidPathParam(format!("Invalid id: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    async fn echo(IdPath(id): IdPath<i32>) -> String {
        id.to_string()
    }

    fn app() -> Router {
        Router::new().route("/things/{id}", get(echo))
    }

    async fn status_of(uri: &str) -> StatusCode {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_integer_segment_is_accepted() {
        assert_eq!(status_of("/things/42").await, StatusCode::OK);
        // range is not the extractor's concern
        assert_eq!(status_of("/things/-3").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_integer_segment_is_bad_request() {
        assert_eq!(status_of("/things/abc").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_of("/things/1.5").await, StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of("/things/99999999999").await,
            StatusCode::BAD_REQUEST
        );
    }
}
