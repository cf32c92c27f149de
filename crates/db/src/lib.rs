//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - The SeaORM implementation of the image repository
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::ImageRepository;

use imagevault_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Builds the connection pool.
///
/// The pool connects lazily: an unreachable server does not fail here, it
/// fails the first query that needs a connection.
///
/// # Errors
///
/// Returns an error if the connection URL cannot be parsed.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_lazy(true)
        .sqlx_logging(false);

    Database::connect(options).await
}
