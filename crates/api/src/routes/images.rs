//! Image upload and retrieval routes.
//!
//! Uploads are streamed from the multipart body straight into one store
//! insert; nothing is written to local disk.

use axum::{
    Json, Router,
    extract::{
        Multipart, Path, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::BytesMut;
use imagevault_core::image::{
    DEFAULT_CONTENT_TYPE, ImageError, ImageService, ImageSummary, NewImage,
};
use imagevault_shared::types::ImageId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError};

const UPLOAD_ERROR: &str = "Internal Server Error";
const LIST_ERROR: &str = "Error fetching images";
const FETCH_ERROR: &str = "Error retrieving image";

/// Creates the image routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_image))
        .route("/images", get(list_images))
        .route("/image/{id}", get(get_image))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for a stored upload.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UploadResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Identifier assigned by the store.
    pub image_id: ImageId,
}

// ============================================================================
// Multipart intake
// ============================================================================

/// Read the single file carried by `field_name`.
///
/// Other fields are skipped, as are parts without a filename (plain form
/// values and empty file inputs).
async fn read_upload(
    service: &ImageService,
    field_name: &str,
    mut multipart: Multipart,
) -> Result<NewImage, ImageError> {
    let mut upload: Option<NewImage> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e, service))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let Some(file_name) = field
            .file_name()
            .filter(|n| !n.is_empty())
            .map(str::to_string)
        else {
            continue;
        };
        if upload.is_some() {
            return Err(ImageError::UnexpectedField(field_name.to_string()));
        }

        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let mut buf = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(&e, service))?
        {
            service.check_size((buf.len() + chunk.len()) as u64)?;
            buf.extend_from_slice(&chunk);
        }

        upload = Some(NewImage::new(file_name, content_type, buf.freeze())?);
    }

    upload.ok_or(ImageError::MissingFile)
}

fn multipart_error(err: &MultipartError, service: &ImageService) -> ImageError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ImageError::BodyTooLarge {
            max: service.max_file_size(),
        }
    } else {
        ImageError::Multipart(err.body_text())
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/upload`
/// Store the uploaded file as a new image record.
async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    // A body that is not multipart at all carries no file.
    let multipart =
        multipart.map_err(|_| ApiError::from_image(ImageError::MissingFile, UPLOAD_ERROR))?;

    let image = read_upload(&state.images, &state.upload_field, multipart)
        .await
        .map_err(|e| ApiError::from_image(e, UPLOAD_ERROR))?;

    let name = image.name().to_string();
    let size = image.size();

    let summary = state
        .images
        .upload(image)
        .await
        .map_err(|e| ApiError::from_image(e, UPLOAD_ERROR))?;

    info!(
        image_id = %summary.id,
        name = %name,
        content_type = %summary.img.content_type,
        size,
        "Image uploaded"
    );

    Ok(Json(UploadResponse {
        message: "Image uploaded and saved".to_string(),
        image_id: summary.id,
    }))
}

/// GET `/images`
/// List metadata for every stored image, without payloads.
async fn list_images(
    State(state): State<AppState>,
) -> Result<Json<Vec<ImageSummary>>, ApiError> {
    let images = state
        .images
        .list()
        .await
        .map_err(|e| ApiError::from_image(e, LIST_ERROR))?;

    Ok(Json(images))
}

/// GET `/image/{id}`
/// Serve the stored bytes with their declared content type.
async fn get_image(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id =
        ImageService::parse_id(&raw_id).map_err(|e| ApiError::from_image(e, FETCH_ERROR))?;

    let image = state
        .images
        .get(id)
        .await
        .map_err(|e| ApiError::from_image(e, FETCH_ERROR))?;

    Ok(([(header::CONTENT_TYPE, image.content_type)], image.data).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upload_response_wire_shape() {
        let id = ImageId::new();
        let body = UploadResponse {
            message: "Image uploaded and saved".to_string(),
            image_id: id,
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "message": "Image uploaded and saved", "imageId": id.to_string() })
        );
    }
}
