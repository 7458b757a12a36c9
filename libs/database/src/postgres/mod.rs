//! PostgreSQL connector: pool configuration, startup connection, readiness probe.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{
    close, connect, connect_from_config, connect_from_config_with_retry, connect_with_options,
};
pub use health::check_health;

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
