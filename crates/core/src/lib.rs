//! Core domain logic for imagevault.
//!
//! This crate contains the image record types, the repository seam the
//! database layer implements, and the service the HTTP handlers call.
//! It has ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `image` - Image records, upload/list/fetch service, in-memory store

pub mod image;
