//! Image repository for database operations.
//!
//! Implements insert, projected list and lookup by id using SeaORM.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::images;
use imagevault_core::image::{
    Image, ImageError, ImageMeta, ImageRepository as ImageRepoTrait, ImageSummary, NewImage,
};
use imagevault_shared::types::ImageId;

/// Image repository implementation.
#[derive(Debug, Clone)]
pub struct ImageRepository {
    db: DatabaseConnection,
}

impl ImageRepository {
    /// Create a new image repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Row shape for the list query; the payload column is never selected.
#[derive(Debug, FromQueryResult)]
struct SummaryRow {
    id: Uuid,
    name: String,
    content_type: String,
}

#[async_trait]
impl ImageRepoTrait for ImageRepository {
    async fn insert(&self, image: NewImage) -> Result<ImageSummary, ImageError> {
        let id = ImageId::new();
        let (name, content_type, data) = image.into_parts();

        let active_model = images::ActiveModel {
            id: Set(id.into_inner()),
            name: Set(name.clone()),
            content_type: Set(content_type.clone()),
            data: Set(data.to_vec()),
            created_at: Set(Utc::now().into()),
        };

        // Skip RETURNING so the payload is not echoed back.
        images::Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| ImageError::repository(e.to_string()))?;

        Ok(ImageSummary {
            id,
            name,
            img: ImageMeta { content_type },
        })
    }

    async fn list_summaries(&self) -> Result<Vec<ImageSummary>, ImageError> {
        let rows = images::Entity::find()
            .select_only()
            .column(images::Column::Id)
            .column(images::Column::Name)
            .column(images::Column::ContentType)
            .order_by_asc(images::Column::CreatedAt)
            .order_by_asc(images::Column::Id)
            .into_model::<SummaryRow>()
            .all(&self.db)
            .await
            .map_err(|e| ImageError::repository(e.to_string()))?;

        Ok(rows.into_iter().map(summary_from_row).collect())
    }

    async fn find_by_id(&self, id: ImageId) -> Result<Option<Image>, ImageError> {
        let model = images::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| ImageError::repository(e.to_string()))?;

        Ok(model.map(to_domain))
    }
}

/// Convert a projected row to the wire summary.
fn summary_from_row(row: SummaryRow) -> ImageSummary {
    ImageSummary {
        id: ImageId::from_uuid(row.id),
        name: row.name,
        img: ImageMeta {
            content_type: row.content_type,
        },
    }
}

/// Convert database model to domain model.
fn to_domain(model: images::Model) -> Image {
    Image {
        id: ImageId::from_uuid(model.id),
        name: model.name,
        content_type: model.content_type,
        data: Bytes::from(model.data),
        created_at: model.created_at.with_timezone(&Utc),
    }
}
