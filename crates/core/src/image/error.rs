//! Image error types.

use imagevault_shared::{AppError, types::ImageId};
use thiserror::Error;

/// Image operation errors.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The request carried no file in the expected field.
    #[error("no file uploaded")]
    MissingFile,

    /// More than one file arrived for the upload field.
    #[error("unexpected field: {0}")]
    UnexpectedField(String),

    /// The multipart body could not be parsed.
    #[error("invalid multipart body: {0}")]
    Multipart(String),

    /// A required record field is missing.
    #[error("invalid image record: {0}")]
    InvalidRecord(String),

    /// The identifier is not a well-formed store key.
    #[error("invalid image id: {0}")]
    InvalidId(String),

    /// File too large.
    #[error("file too large: {size} bytes exceeds maximum {max} bytes")]
    FileTooLarge {
        /// Bytes received so far.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// The request body hit the transport limit before the file was read.
    #[error("request body exceeds the {max}-byte upload limit")]
    BodyTooLarge {
        /// Maximum allowed file size.
        max: u64,
    },

    /// No record has this identifier.
    #[error("image not found: {0}")]
    NotFound(ImageId),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl ImageError {
    /// Create an invalid record error.
    #[must_use]
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Create a file too large error.
    #[must_use]
    pub fn file_too_large(size: u64, max: u64) -> Self {
        Self::FileTooLarge { size, max }
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Returns true when the caller sent a bad request.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Repository(_))
    }
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::MissingFile
            | ImageError::UnexpectedField(_)
            | ImageError::Multipart(_)
            | ImageError::InvalidRecord(_)
            | ImageError::InvalidId(_) => Self::Validation(err.to_string()),
            ImageError::FileTooLarge { .. } | ImageError::BodyTooLarge { .. } => {
                Self::PayloadTooLarge(err.to_string())
            }
            ImageError::NotFound(_) => Self::NotFound(err.to_string()),
            ImageError::Repository(msg) => Self::Database(msg),
        }
    }
}
