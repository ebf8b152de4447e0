//! Items Domain
//!
//! CRUD over a single entity: an item with an optional name and a completion flag.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, status codes, Location header
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Id checks, existence checks, one unit of work per call
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │ Repository  │     │   Mapper    │  ← Item <-> ItemDto
//! └──────┬──────┘     └─────────────┘
//!        │
//! ┌──────▼──────────────────────────┐
//! │ PgItemStore | InMemoryItemStore │  ← backing stores
//! └─────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{handlers, InMemoryItemStore, ItemService};
//!
//! let service = ItemService::new(InMemoryItemStore::new());
//! let router = axum::Router::new().nest("/items", handlers::router(service));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod mapping;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use mapping::ItemMapper;
pub use models::{Item, ItemDto};
pub use postgres::{PgItemRepository, PgItemStore};
pub use repository::{InMemoryItemRepository, InMemoryItemStore};
pub use service::ItemService;
