//! Backing store handle shared by routes, readiness and shutdown

use domain_items::InMemoryItemStore;
use sea_orm::DatabaseConnection;
use tracing::{error, info};

#[derive(Clone, Debug)]
pub enum StoreHandle {
    Postgres(DatabaseConnection),
    Memory(InMemoryItemStore),
}

impl StoreHandle {
    /// Release store resources during shutdown
    pub async fn close(self) {
        match self {
            StoreHandle::Postgres(db) => match db.close().await {
                Ok(()) => info!("PostgreSQL connection closed successfully"),
                Err(e) => error!("Error closing PostgreSQL: {}", e),
            },
            StoreHandle::Memory(store) => {
                let items = store.len().await;
                info!(items, "Dropping in-memory item store");
            }
        }
    }
}
