use axum::http::{HeaderName, HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::auth::USER_ID_HEADER;

/// CORS layer for the given origins.
///
/// Methods cover the CRUD verbs; allowed headers include the identity
/// header so browser tooling behind the gateway can exercise the API.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(USER_ID_HEADER),
        ])
        .max_age(Duration::from_secs(3600))
}

/// Parse comma-separated origins, e.g. `http://localhost:3000,https://example.com`.
pub fn parse_allowed_origins(origins: &str) -> io::Result<Vec<HeaderValue>> {
    let parsed = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if parsed.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    Ok(parsed)
}

/// CORS layer from `CORS_ALLOWED_ORIGIN`, or `None` when the variable is unset
/// (same-origin deployments behind the gateway).
pub fn cors_layer_from_env() -> io::Result<Option<CorsLayer>> {
    match std::env::var("CORS_ALLOWED_ORIGIN") {
        Ok(origins) => {
            let allowed = parse_allowed_origins(&origins)?;
            tracing::info!("CORS configured with allowed origins: {}", origins);
            Ok(Some(create_cors_layer(allowed)))
        }
        Err(_) => Ok(None),
    }
}
