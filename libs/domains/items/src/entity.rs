use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

use crate::models::Item;

/// Sea-ORM Entity for the items table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub name: Option<String>,
    pub is_complete: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Item {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            is_complete: model.is_complete,
        }
    }
}

impl ActiveModel {
    /// Insert shape: the serial column assigns the id
    pub fn for_insert(item: Item) -> Self {
        Self {
            id: NotSet,
            name: Set(item.name),
            is_complete: Set(item.is_complete),
        }
    }

    /// Update shape: keyed by id, every other column written
    pub fn for_update(item: Item) -> Self {
        Self {
            id: Unchanged(item.id),
            name: Set(item.name),
            is_complete: Set(item.is_complete),
        }
    }
}
