//! Mapping from domain errors to plain-text HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use imagevault_core::image::ImageError;
use imagevault_shared::AppError;
use tracing::{debug, error};

/// Error returned by route handlers.
///
/// Client errors carry a short explanation. Server errors carry a fixed,
/// route-specific message; the cause is logged and not sent to the client.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    message: String,
}

impl ApiError {
    /// Wrap an image error; `server_message` is the body used for 5xx.
    #[must_use]
    pub fn from_image(err: ImageError, server_message: &'static str) -> Self {
        let message = match &err {
            ImageError::MissingFile => "No file uploaded".to_string(),
            ImageError::InvalidId(_) => "Invalid image id".to_string(),
            ImageError::NotFound(_) => "Image not found".to_string(),
            ImageError::Repository(_) => server_message.to_string(),
            other => capitalize(&other.to_string()),
        };

        Self {
            error: err.into(),
            message,
        }
    }

    /// HTTP status of the response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Body of the response.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if self.error.is_server_error() {
            error!(
                error = %self.error,
                code = self.error.error_code(),
                "Request failed"
            );
        } else {
            debug!(
                error = %self.error,
                code = self.error.error_code(),
                status = status.as_u16(),
                "Request rejected"
            );
        }

        (status, self.message).into_response()
    }
}

fn capitalize(msg: &str) -> String {
    let mut chars = msg.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
