//! Image service implementation.

use std::sync::Arc;

use async_trait::async_trait;
use imagevault_shared::{config::UploadConfig, types::ImageId};
use tracing::debug;

use super::error::ImageError;
use super::types::{Image, ImageSummary, NewImage};

/// Repository trait for image persistence.
///
/// Implemented by the db crate on SeaORM and by `InMemoryImageRepository`.
/// Records are only ever inserted and read.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Insert one record; the store assigns its identifier.
    async fn insert(&self, image: NewImage) -> Result<ImageSummary, ImageError>;

    /// All records without their payload, in insertion order.
    async fn list_summaries(&self) -> Result<Vec<ImageSummary>, ImageError>;

    /// Find a record, payload included.
    async fn find_by_id(&self, id: ImageId) -> Result<Option<Image>, ImageError>;
}

/// Service for storing and serving images.
#[derive(Clone)]
pub struct ImageService {
    repo: Arc<dyn ImageRepository>,
    max_file_size: u64,
}

impl ImageService {
    /// Create a new image service with the default size limit.
    #[must_use]
    pub fn new(repo: Arc<dyn ImageRepository>) -> Self {
        Self {
            repo,
            max_file_size: UploadConfig::DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Maximum accepted payload size in bytes.
    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Check a (possibly partial) payload size against the limit.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::FileTooLarge` when `size` exceeds the limit.
    pub fn check_size(&self, size: u64) -> Result<(), ImageError> {
        if size > self.max_file_size {
            return Err(ImageError::file_too_large(size, self.max_file_size));
        }
        Ok(())
    }

    /// Parse a path identifier.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::InvalidId` if `raw` is not a UUID.
    pub fn parse_id(raw: &str) -> Result<ImageId, ImageError> {
        raw.parse()
            .map_err(|_| ImageError::InvalidId(raw.to_string()))
    }

    /// Store one image and return its metadata.
    ///
    /// Every call creates a new record, identical bytes included.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is too large or the insert fails.
    pub async fn upload(&self, image: NewImage) -> Result<ImageSummary, ImageError> {
        self.check_size(image.size())?;

        let size = image.size();
        let summary = self.repo.insert(image).await?;
        debug!(image_id = %summary.id, size, "Image record inserted");

        Ok(summary)
    }

    /// List metadata for every stored image.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn list(&self) -> Result<Vec<ImageSummary>, ImageError> {
        self.repo.list_summaries().await
    }

    /// Fetch one image with its payload.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::NotFound` if no record has this id.
    pub async fn get(&self, id: ImageId) -> Result<Image, ImageError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ImageError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::InMemoryImageRepository;
    use bytes::Bytes;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0";

    /// Repository whose every call fails, standing in for an unreachable store.
    struct FailingRepository;

    #[async_trait]
    impl ImageRepository for FailingRepository {
        async fn insert(&self, _image: NewImage) -> Result<ImageSummary, ImageError> {
            Err(ImageError::repository("connection refused"))
        }

        async fn list_summaries(&self) -> Result<Vec<ImageSummary>, ImageError> {
            Err(ImageError::repository("connection refused"))
        }

        async fn find_by_id(&self, _id: ImageId) -> Result<Option<Image>, ImageError> {
            Err(ImageError::repository("connection refused"))
        }
    }

    fn service() -> (ImageService, Arc<InMemoryImageRepository>) {
        let repo = Arc::new(InMemoryImageRepository::new());
        (ImageService::new(repo.clone()), repo)
    }

    fn png(name: &str) -> NewImage {
        NewImage::new(name, "image/png", Bytes::from_static(PNG_HEADER)).expect("valid image")
    }

    #[tokio::test]
    async fn test_upload_then_get_returns_same_bytes() {
        let (service, _) = service();

        let summary = service.upload(png("a.png")).await.unwrap();
        let image = service.get(summary.id).await.unwrap();

        assert_eq!(image.id, summary.id);
        assert_eq!(image.name, "a.png");
        assert_eq!(image.content_type, "image/png");
        assert_eq!(&image.data[..], PNG_HEADER);
    }

    #[tokio::test]
    async fn test_upload_does_not_deduplicate() {
        let (service, repo) = service();

        let first = service.upload(png("a.png")).await.unwrap();
        let second = service.upload(png("a.png")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_payload() {
        let (service, repo) = service();
        let service = service.with_max_file_size(4);

        let err = service.upload(png("a.png")).await.unwrap_err();
        assert!(matches!(err, ImageError::FileTooLarge { size: 10, max: 4 }));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let (service, _) = service();

        let a = service.upload(png("a.png")).await.unwrap();
        let b = service.upload(png("b.png")).await.unwrap();
        let c = service.upload(png("c.png")).await.unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed, vec![a, b, c]);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let (service, _) = service();
        service.upload(png("a.png")).await.unwrap();

        let missing = ImageId::new();
        let err = service.get(missing).await.unwrap_err();
        assert!(matches!(err, ImageError::NotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn test_store_failures_surface_as_repository_errors() {
        let service = ImageService::new(Arc::new(FailingRepository));

        assert!(matches!(
            service.upload(png("a.png")).await,
            Err(ImageError::Repository(_))
        ));
        assert!(matches!(service.list().await, Err(ImageError::Repository(_))));
        assert!(matches!(
            service.get(ImageId::new()).await,
            Err(ImageError::Repository(_))
        ));
    }

    #[test]
    fn test_parse_id() {
        let id = ImageId::new();
        assert_eq!(ImageService::parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            ImageService::parse_id("not-an-id"),
            Err(ImageError::InvalidId(raw)) if raw == "not-an-id"
        ));
    }

    #[test]
    fn test_check_size_boundary() {
        let (service, _) = service();
        let service = service.with_max_file_size(1024);
        assert!(service.check_size(1024).is_ok());
        assert!(service.check_size(1025).is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::image::InMemoryImageRepository;
    use proptest::prelude::*;

    // Property: any accepted upload is returned byte-for-byte with the
    // declared content type.
    proptest! {
        #[test]
        fn prop_upload_get_roundtrip(
            data in proptest::collection::vec(any::<u8>(), 0..2048),
            name in "[a-zA-Z0-9_-]{1,20}\\.[a-z]{2,4}",
            content_type in "[a-z]+/[a-z0-9.+-]+",
        ) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .expect("runtime");
            let service = ImageService::new(Arc::new(InMemoryImageRepository::new()));
            let image = NewImage::new(name.clone(), content_type.clone(), data.clone())
                .expect("valid image");

            let fetched = rt.block_on(async {
                let summary = service.upload(image).await?;
                service.get(summary.id).await
            }).expect("roundtrip");

            prop_assert_eq!(&fetched.data[..], &data[..]);
            prop_assert_eq!(fetched.name, name);
            prop_assert_eq!(fetched.content_type, content_type);
        }
    }

    // Property: payloads above the limit are rejected and never stored.
    proptest! {
        #[test]
        fn prop_size_limit(max in 0u64..512, len in 0usize..1024) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .expect("runtime");
            let repo = Arc::new(InMemoryImageRepository::new());
            let service = ImageService::new(repo.clone()).with_max_file_size(max);
            let image = NewImage::new("f.bin", "application/octet-stream", vec![0u8; len])
                .expect("valid image");

            let result = rt.block_on(service.upload(image));

            if len as u64 <= max {
                prop_assert!(result.is_ok());
                prop_assert_eq!(repo.len(), 1);
            } else {
                let too_large = matches!(result, Err(ImageError::FileTooLarge { .. }));
                prop_assert!(too_large, "Expected FileTooLarge error");
                prop_assert!(repo.is_empty());
            }
        }
    }
}
