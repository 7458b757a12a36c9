//! # Axum Helpers
//!
//! Shared building blocks for the workspace's Axum services.
//!
//! - **[`errors`]**: `AppError` and the `ErrorResponse` body every failure uses
//! - **[`extractors`]**: `UuidPath`, `ValidatedJson`
//! - **[`auth`]**: caller identity handed over by the gateway
//! - **[`http`]**: CORS and security headers
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &server_config)?;
//! create_production_app(router, &server_config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{CallerId, USER_ID_HEADER, trusted_identity_header};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_app, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{UuidPath, ValidatedJson};
