//! Image upload handler

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Extension, Json,
};
use serde::Serialize;

use crate::domain::entities::User;
use crate::domain::ports::UploadedFile;
use crate::error::AppError;
use crate::AppState;

/// Storage directory for article images
pub const ARTICLE_IMAGE_DIR: &str = "article";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    pub image_url: String,
}

/// POST /api/v1/docshund/forums/image
///
/// Accepts multipart/form-data with a single file field named "file".
pub async fn upload_image(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImageUploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;

        tracing::debug!(user_id = %user.id, file_name = %file_name, size = bytes.len(), "Image received");

        let image_url = state
            .upload_service
            .upload_file(
                UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                },
                ARTICLE_IMAGE_DIR,
            )
            .await?;

        return Ok(Json(ImageUploadResponse { image_url }));
    }

    Err(AppError::BadRequest("No file provided".to_string()))
}
