use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Persisted item. The store owns it; services only hold transient copies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Item {
    /// Assigned by the store on creation, positive once persisted
    pub id: i32,
    pub name: Option<String>,
    pub is_complete: bool,
}

/// Item as exchanged over HTTP.
///
/// `id` is ignored on create and echoed back with the assigned value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    #[serde(default)]
    #[schema(example = 1)]
    pub id: i32,

    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Buy milk")]
    pub name: Option<String>,

    #[serde(default)]
    pub is_complete: bool,
}
