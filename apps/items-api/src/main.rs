//! Items API - REST server for item CRUD

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_items::InMemoryItemStore;
use migration::Migrator;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, StoreConfig};
use state::StoreHandle;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let store = match config.store.clone() {
        StoreConfig::Postgres {
            database,
            run_migrations,
        } => {
            let db = database::postgres::connect_from_config_with_retry(database, None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

            if run_migrations {
                database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;
            }
            StoreHandle::Postgres(db)
        }
        StoreConfig::Memory => {
            warn!("Using the in-memory item store; items are lost on shutdown");
            StoreHandle::Memory(InMemoryItemStore::new())
        }
    };

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes(&store)).await?;

    // - /health: liveness check with app name/version
    // - /ready: readiness check against the configured store
    let app = router
        .merge(health_router(config.app))
        .merge(api::ready_router(store.clone()));

    info!(
        app = config.app.name,
        version = config.app.version,
        "Starting Items API"
    );

    create_production_app(app, &config.server, async move {
        info!("Shutting down: closing item store");
        store.close().await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Items API shutdown complete");
    Ok(())
}
