use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    /// Precondition on an argument failed, e.g. a non-positive id
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    /// A required argument was absent
    #[error("Argument '{0}' must not be null")]
    NullArgument(&'static str),

    #[error("Item {0} not found")]
    NotFound(i32),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ItemError {
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
}

pub type ItemResult<T> = Result<T, ItemError>;

impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::InvalidArgument { .. } => AppError::InvalidArgument(err.to_string()),
            ItemError::NullArgument(_) => AppError::MissingBody(err.to_string()),
            ItemError::NotFound(_) => AppError::NotFound(err.to_string()),
            // A row removed between lookup and commit is still a miss
            ItemError::Database(DatabaseError::RecordNotFound { .. }) => {
                AppError::NotFound(err.to_string())
            }
            ItemError::Database(e) => AppError::Database(e.to_string()),
            ItemError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
