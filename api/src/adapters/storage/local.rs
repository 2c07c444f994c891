//! Local disk implementation of FileUploadService
//!
//! Files land in `<root>/<directory>/<uuid>.<ext>` and are served back under
//! `<public_base_url>/<directory>/<uuid>.<ext>`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::domain::ports::{FileUploadService, UploadedFile};
use crate::error::AppError;

/// Content types accepted for upload, with the extension they are stored under
pub const ALLOWED_IMAGE_TYPES: [(&str, &str); 4] = [
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

pub struct LocalFileUploadService {
    root: PathBuf,
    public_base_url: String,
    max_bytes: usize,
}

impl LocalFileUploadService {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            max_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the extension to store the file under
    fn check(&self, file: &UploadedFile) -> Result<&'static str, AppError> {
        let Some(ext) = extension_for(&file.content_type) else {
            let allowed: Vec<&str> = ALLOWED_IMAGE_TYPES.iter().map(|(ty, _)| *ty).collect();
            return Err(AppError::BadRequest(format!(
                "Invalid file type: {}. Allowed types: {}",
                file.content_type,
                allowed.join(", ")
            )));
        };
        if file.bytes.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }
        if file.bytes.len() > self.max_bytes {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size: {} bytes",
                self.max_bytes
            )));
        }
        Ok(ext)
    }
}

/// Directory names are a single path segment of `[A-Za-z0-9_-]`
fn is_safe_directory(directory: &str) -> bool {
    !directory.is_empty()
        && directory
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// The client's file name is ignored: `/uploads` picks the served MIME type
/// from the extension.
fn extension_for(content_type: &str) -> Option<&'static str> {
    ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(ty, _)| *ty == content_type)
        .map(|(_, ext)| *ext)
}

#[async_trait]
impl FileUploadService for LocalFileUploadService {
    async fn upload_file(&self, file: UploadedFile, directory: &str) -> Result<String, AppError> {
        if !is_safe_directory(directory) {
            return Err(AppError::Internal(format!(
                "Refusing upload directory {:?}",
                directory
            )));
        }
        let ext = self.check(&file)?;

        let dir = self.root.join(directory);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {}", e)))?;

        let stored_name = format!("{}.{}", Uuid::new_v4(), ext);
        fs::write(dir.join(&stored_name), &file.bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to save file: {}", e)))?;

        tracing::info!(
            directory,
            original_name = %file.file_name,
            stored_name = %stored_name,
            size = file.bytes.len(),
            "File uploaded"
        );

        Ok(format!(
            "{}/{}/{}",
            self.public_base_url, directory, stored_name
        ))
    }
}
