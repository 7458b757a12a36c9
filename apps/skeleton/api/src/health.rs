//! Readiness check backed by a real database round trip.

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use sea_orm::DatabaseConnection;

pub fn ready_router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(db)
}

async fn ready_handler(State(db): State<DatabaseConnection>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            database::postgres::check_health(&db)
                .await
                .map_err(|e| format!("Database check failed: {}", e))
        }),
    )];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
