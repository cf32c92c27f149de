//! In-memory image repository.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use imagevault_shared::types::ImageId;

use super::error::ImageError;
use super::service::ImageRepository;
use super::types::{Image, ImageSummary, NewImage};

/// Image store backed by a `Vec`, kept in insertion order.
///
/// Lets the HTTP layer and the service run without a database.
#[derive(Debug, Default)]
pub struct InMemoryImageRepository {
    records: RwLock<Vec<Image>>,
}

impl InMemoryImageRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().map_or(0, |records| records.len())
    }

    /// Returns true when nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> ImageError {
    ImageError::repository("in-memory store lock poisoned")
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
    async fn insert(&self, image: NewImage) -> Result<ImageSummary, ImageError> {
        let (name, content_type, data) = image.into_parts();
        let record = Image {
            id: ImageId::new(),
            name,
            content_type,
            data,
            created_at: Utc::now(),
        };
        let summary = record.summary();

        self.records.write().map_err(|_| poisoned())?.push(record);

        Ok(summary)
    }

    async fn list_summaries(&self) -> Result<Vec<ImageSummary>, ImageError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.iter().map(Image::summary).collect())
    }

    async fn find_by_id(&self, id: ImageId) -> Result<Option<Image>, ImageError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_insert_assigns_fresh_ids() {
        let repo = InMemoryImageRepository::new();
        assert!(repo.is_empty());

        let image = NewImage::new("a.png", "image/png", Bytes::from_static(b"abc")).unwrap();
        let first = repo.insert(image.clone()).await.unwrap();
        let second = repo.insert(image).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_id_returns_payload() {
        let repo = InMemoryImageRepository::new();
        let image = NewImage::new("a.gif", "image/gif", Bytes::from_static(b"GIF89a")).unwrap();
        let summary = repo.insert(image).await.unwrap();

        let found = repo.find_by_id(summary.id).await.unwrap().expect("stored");
        assert_eq!(&found.data[..], b"GIF89a");
        assert_eq!(found.summary(), summary);

        assert!(repo.find_by_id(ImageId::new()).await.unwrap().is_none());
    }
}
