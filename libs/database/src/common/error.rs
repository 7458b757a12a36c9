/// Error type for connector-level operations (connect, health, shutdown).
///
/// Query errors raised by repositories stay as `sea_orm::DbErr` and are
/// classified by the domain that issued them.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
