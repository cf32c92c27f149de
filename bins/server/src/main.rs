//! imagevault API Server
//!
//! Main entry point for the image upload service.

use std::sync::Arc;

use anyhow::Context;
use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imagevault_api::{AppState, create_router};
use imagevault_core::image::ImageService;
use imagevault_db::{ImageRepository, connect, migration::Migrator};
use imagevault_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imagevault=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // The pool is lazy; an unreachable database is logged, not fatal.
    let db = connect(&config.database).await?;
    match db.ping().await {
        Ok(()) => info!("Connected to database"),
        Err(e) => error!(
            error = %e,
            "Database unreachable; store requests will fail until it recovers"
        ),
    }

    if config.database.run_migrations {
        match Migrator::up(&db, None).await {
            Ok(()) => info!("Migrations applied"),
            Err(e) => error!(error = %e, "Failed to apply migrations"),
        }
    }

    // Create application state
    let repo = ImageRepository::new(db);
    let images = ImageService::new(Arc::new(repo));
    let state = AppState::new(images, &config.upload);
    info!(
        max_file_size = config.upload.max_file_size,
        field = %config.upload.field_name,
        "Upload intake configured"
    );

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
