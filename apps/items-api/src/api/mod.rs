//! API routes module

pub mod health;

use axum::Router;
use domain_items::{ItemService, PgItemStore, handlers};

use crate::state::StoreHandle;

pub use health::ready_router;

/// Create all API routes (nested under `/api` by `create_router`)
pub fn routes(store: &StoreHandle) -> Router {
    let items = match store {
        StoreHandle::Postgres(db) => {
            handlers::router(ItemService::new(PgItemStore::new(db.clone())))
        }
        StoreHandle::Memory(store) => handlers::router(ItemService::new(store.clone())),
    };

    Router::new().nest("/items", items)
}
