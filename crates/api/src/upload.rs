use axum::extract::Multipart;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use analyze::Document;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Lowercase extensions accepted by the upload endpoint.
    pub allowed_extensions: Vec<String>,
    pub field_name: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: vec!["txt".to_string(), "md".to_string()],
            field_name: "file".to_string(),
        }
    }
}

impl UploadConfig {
    pub fn is_allowed(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => {
                let ext = ext.to_lowercase();
                self.allowed_extensions.iter().any(|allowed| *allowed == ext)
            }
            None => false,
        }
    }

    /// Validate one uploaded file and turn it into document text.
    pub fn decode(&self, filename: &str, bytes: &[u8]) -> Result<String, ApiError> {
        if filename.is_empty() {
            return Err(ApiError::MissingFilename);
        }
        if !self.is_allowed(filename) {
            return Err(ApiError::DisallowedExtension {
                filename: filename.to_string(),
            });
        }

        String::from_utf8(bytes.to_vec()).map_err(|_| ApiError::InvalidEncoding {
            filename: filename.to_string(),
        })
    }
}

/// Collect every file field from a multipart upload, in upload order.
pub async fn read_documents(
    multipart: &mut Multipart,
    config: &UploadConfig,
) -> Result<Vec<Document>, ApiError> {
    let mut documents = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        if field.name() != Some(config.field_name.as_str()) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Multipart(e.to_string()))?;

        let text = config.decode(&filename, &bytes)?;
        documents.push(Document::new(documents.len(), text));
    }

    Ok(documents)
}
