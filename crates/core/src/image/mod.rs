//! Image records and the service that stores and serves them.
//!
//! This module provides:
//! - Record types (`NewImage`, `Image`, `ImageSummary`)
//! - The `ImageRepository` seam implemented by the db crate
//! - `ImageService` with upload, list and fetch-by-id
//! - `InMemoryImageRepository` for tests and local runs

mod error;
mod memory;
mod service;
mod types;

pub use error::ImageError;
pub use memory::InMemoryImageRepository;
pub use service::{ImageRepository, ImageService};
pub use types::{DEFAULT_CONTENT_TYPE, Image, ImageMeta, ImageSummary, NewImage};
