use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
};
use sea_orm::DatabaseConnection;
use tower_http::normalize_path::NormalizePath;

use crate::config::SkeletonConfig;
use crate::error::SkeletonResult;
use crate::handlers;
use crate::postgres::PgItemRepository;
use crate::service::ItemService;

pub const PLUGIN_NAME: &str = "skeleton";

/// Mount point of the item routes on the host router.
pub const PREFIX: &str = "/api/skeleton";

/// Settings handed over by the host. Unset values keep their defaults.
#[derive(Clone, Default)]
pub struct PluginSettings {
    pub enabled: Option<bool>,
    pub max_items: Option<i64>,
    pub database: Option<DatabaseConnection>,
}

/// Host-facing wrapper that configures the module and registers its routes.
#[derive(Default)]
pub struct SkeletonPlugin {
    config: SkeletonConfig,
    routes: Option<Router>,
}

impl SkeletonPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn config(&self) -> &SkeletonConfig {
        &self.config
    }

    /// Merge `settings` over the defaults, validate, and build the item
    /// routes when a database is supplied.
    ///
    /// Without a database the plugin still initializes, but
    /// [`setup_endpoints`](Self::setup_endpoints) registers nothing.
    pub fn initialize(&mut self, settings: PluginSettings) -> SkeletonResult<()> {
        let mut config = SkeletonConfig::default();
        if let Some(enabled) = settings.enabled {
            config.enabled = enabled;
        }
        if let Some(max_items) = settings.max_items {
            config.max_items = max_items;
        }

        if let Err(e) = config.validate() {
            tracing::error!(plugin = PLUGIN_NAME, error = %e, "Invalid plugin configuration");
            return Err(e);
        }

        match settings.database {
            Some(db) => {
                let repository = PgItemRepository::new(db);
                let service = ItemService::new(repository, config.clone());
                self.routes = Some(handlers::router(service));
            }
            None => {
                tracing::warn!(
                    plugin = PLUGIN_NAME,
                    "No database connection provided; endpoints will not be available"
                );
                self.routes = None;
            }
        }

        tracing::info!(
            plugin = PLUGIN_NAME,
            enabled = config.enabled,
            max_items = config.max_items,
            "Plugin initialized"
        );
        self.config = config;
        Ok(())
    }

    /// Per-request hook applied to every item route. Currently passes
    /// requests through unchanged.
    pub async fn middleware(request: Request, next: Next) -> Response {
        next.run(request).await
    }

    /// Nest the item routes under [`PREFIX`] on `router`.
    ///
    /// The collection answers at both `/api/skeleton` and `/api/skeleton/`.
    pub fn setup_endpoints(&self, router: Router) -> Router {
        if !self.config.enabled {
            tracing::info!(plugin = PLUGIN_NAME, "Plugin disabled, skipping endpoint registration");
            return router;
        }

        let Some(routes) = self.routes.clone() else {
            tracing::warn!(
                plugin = PLUGIN_NAME,
                "Handler not initialized, skipping endpoint registration"
            );
            return router;
        };

        tracing::info!(plugin = PLUGIN_NAME, prefix = PREFIX, "Registering endpoints");
        let routes = routes.layer(middleware::from_fn(Self::middleware));
        let mounted = Router::new().nest(PREFIX, routes);
        let trailing = NormalizePath::trim_trailing_slash(mounted.clone());

        router
            .merge(mounted)
            .route_service(&format!("{PREFIX}/"), trailing)
    }
}
