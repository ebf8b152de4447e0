//! Custom extractors for Axum handlers.
//!
//! Every rejection renders through [`AppError`](crate::errors::AppError), so clients
//! see the same error envelope regardless of where a request failed.

pub mod id_path;
pub mod optional_json;

pub use id_path::IdPath;
pub use optional_json::OptionalValidatedJson;
