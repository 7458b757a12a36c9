//! Skeleton API - host for the skeleton items plugin

use axum::{Router, middleware};
use axum_helpers::server::{create_production_app, health_router};
use axum_helpers::trusted_identity_header;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_skeleton::{PluginSettings, SkeletonPlugin};
use std::time::Duration;
use tracing::info;

mod config;
mod health;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    let mut plugin = SkeletonPlugin::new();
    plugin
        .initialize(PluginSettings {
            enabled: config.skeleton_enabled,
            max_items: config.skeleton_max_items,
            database: Some(db.clone()),
        })
        .map_err(|e| eyre::eyre!("Failed to initialize {} plugin: {}", plugin.name(), e))?;

    // Identity comes from the gateway; only the plugin routes need it
    let api_routes = plugin
        .setup_endpoints(Router::new())
        .layer(middleware::from_fn(trusted_identity_header));

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &config.server)?;

    // - /health: liveness check with app name/version
    // - /ready: readiness check against the database
    let app = router
        .merge(health_router(config.app))
        .merge(health::ready_router(db.clone()));

    info!(
        plugin = plugin.name(),
        max_items = plugin.config().max_items,
        "Starting skeleton API"
    );

    create_production_app(
        app,
        &config.server,
        Duration::from_secs(30), // 30s graceful shutdown timeout
        async move {
            info!("Shutting down: closing database connections");
            database::postgres::close(db).await;
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Skeleton API shutdown complete");
    Ok(())
}
