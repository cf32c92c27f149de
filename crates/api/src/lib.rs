//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Upload, list and fetch routes for images
//! - Health check route
//! - Mapping from domain errors to HTTP responses

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use imagevault_core::image::ImageService;
use imagevault_shared::config::UploadConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Image service over the configured store.
    pub images: ImageService,
    /// Multipart field that carries the uploaded file.
    pub upload_field: Arc<str>,
}

impl AppState {
    /// Build state from a service and the upload settings.
    ///
    /// The service's size limit is taken from `upload.max_file_size`.
    #[must_use]
    pub fn new(images: ImageService, upload: &UploadConfig) -> Self {
        Self {
            images: images.with_max_file_size(upload.max_file_size),
            upload_field: Arc::from(upload.field_name.as_str()),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.images.max_file_size())
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .merge(routes::api_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
