//! Skeleton Domain
//!
//! A minimal per-user CRUD resource ("items") meant as the starting point
//! for new plugins. Every item belongs to one user; list, update and
//! delete are scoped to the calling user.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Plugin    │  ← Settings, route registration
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Handlers   │  ← HTTP endpoints under /api/skeleton
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Caller resolution, pagination, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTOs, page envelope
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum::Router;
//! use domain_skeleton::{PluginSettings, SkeletonPlugin};
//!
//! # fn wire(db: sea_orm::DatabaseConnection) -> domain_skeleton::SkeletonResult<Router> {
//! let mut plugin = SkeletonPlugin::new();
//! plugin.initialize(PluginSettings {
//!     database: Some(db),
//!     ..Default::default()
//! })?;
//!
//! let router = plugin.setup_endpoints(Router::new());
//! # Ok(router)
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod plugin;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use config::SkeletonConfig;
pub use error::{SkeletonError, SkeletonResult};
pub use handlers::ApiDoc;
pub use models::{CreateItem, Item, ItemList, ListParams, Pagination, UpdateItem};
pub use plugin::{PREFIX, PluginSettings, SkeletonPlugin};
pub use postgres::PgItemRepository;
pub use repository::ItemRepository;
pub use service::ItemService;
