//! Image record types and data structures.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use imagevault_shared::types::ImageId;
use serde::{Deserialize, Serialize};

use super::error::ImageError;

/// Content type recorded when the client does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A validated image waiting to be inserted.
///
/// Fields are private so every instance has passed `NewImage::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    name: String,
    content_type: String,
    data: Bytes,
}

impl NewImage {
    /// Builds a record from the uploaded parts.
    ///
    /// The content type is trusted as declared; only presence is checked.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::InvalidRecord` if `name` or `content_type` is blank.
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Result<Self, ImageError> {
        let name = name.into();
        let content_type = content_type.into();

        if name.trim().is_empty() {
            return Err(ImageError::invalid_record("name is required"));
        }
        if content_type.trim().is_empty() {
            return Err(ImageError::invalid_record("content type is required"));
        }

        Ok(Self {
            name,
            content_type,
            data: data.into(),
        })
    }

    /// Original filename.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared MIME type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Raw payload.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Splits into `(name, content_type, data)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String, Bytes) {
        (self.name, self.content_type, self.data)
    }
}

/// A stored image including its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Store-assigned identifier.
    pub id: ImageId,
    /// Original filename.
    pub name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Raw payload.
    pub data: Bytes,
    /// Insert time.
    pub created_at: DateTime<Utc>,
}

impl Image {
    /// Metadata view without the payload.
    #[must_use]
    pub fn summary(&self) -> ImageSummary {
        ImageSummary {
            id: self.id,
            name: self.name.clone(),
            img: ImageMeta {
                content_type: self.content_type.clone(),
            },
        }
    }
}

/// Image metadata as returned by the list endpoint.
///
/// Serialized as `{ "_id", "name", "img": { "contentType" } }`. There is no
/// payload field, and unknown fields are rejected on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageSummary {
    /// Store-assigned identifier.
    #[serde(rename = "_id")]
    pub id: ImageId,
    /// Original filename.
    pub name: String,
    /// Payload metadata.
    pub img: ImageMeta,
}

/// Payload metadata nested under `img`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageMeta {
    /// Declared MIME type.
    #[serde(rename = "contentType")]
    pub content_type: String,
}
