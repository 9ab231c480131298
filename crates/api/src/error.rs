use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use analyze::BatchError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("no documents supplied")]
    NoDocuments,

    #[error("uploaded file has no filename")]
    MissingFilename,

    #[error("file '{filename}' has a disallowed extension")]
    DisallowedExtension { filename: String },

    #[error("file '{filename}' is not valid UTF-8")]
    InvalidEncoding { filename: String },

    #[error("malformed upload: {0}")]
    Multipart(String),

    #[error(transparent)]
    Batch(#[from] BatchError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Batch(BatchError::NoDocumentSucceeded(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            // Keep the per-document failures visible to the caller
            ApiError::Batch(BatchError::NoDocumentSucceeded(result)) => json!({
                "error": self.to_string(),
                "batch": result,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
