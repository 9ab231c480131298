use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::ApiError;
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::upload::{UploadConfig, read_documents};
use analyze::{BatchError, BatchOrchestrator, BatchResult, Document};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<BatchOrchestrator>,
    pub metrics: Arc<Metrics>,
    pub upload: Arc<UploadConfig>,
}

impl AppState {
    pub fn new(orchestrator: BatchOrchestrator, upload: UploadConfig) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            metrics: Metrics::new(),
            upload: Arc::new(upload),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    max_concurrency: usize,
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    documents: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/analyze", post(analyze_documents))
        .route("/upload", post(upload_files))
        .route("/metrics", get(get_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        max_concurrency: state.orchestrator.max_concurrency(),
    })
}

async fn analyze_documents(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<BatchResult>, ApiError> {
    run_batch(&state, Document::from_texts(req.documents)).await
}

async fn upload_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchResult>, ApiError> {
    let documents = read_documents(&mut multipart, &state.upload).await?;
    run_batch(&state, documents).await
}

async fn get_metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

async fn run_batch(state: &AppState, documents: Vec<Document>) -> Result<Json<BatchResult>, ApiError> {
    if documents.is_empty() {
        return Err(ApiError::NoDocuments);
    }

    info!(documents = documents.len(), "Received analysis request");

    match state.orchestrator.run_batch(documents).await {
        Ok(result) => {
            state.metrics.record_batch(&result, false);
            Ok(Json(result))
        }
        Err(BatchError::NoDocumentSucceeded(result)) => {
            state.metrics.record_batch(&result, true);
            Err(BatchError::NoDocumentSucceeded(result).into())
        }
        Err(err) => Err(err.into()),
    }
}
