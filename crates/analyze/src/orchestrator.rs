use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout_at};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::analyzer::DocumentAnalyzer;
use crate::config::AnalysisConfig;
use crate::document::{BatchResult, Document, DocumentFailure, DocumentOutcome, DocumentResult};
use crate::error::{AnalysisError, BatchError, ConfigError};
use detect::DetectionClient;

/// Analyzes a batch of documents with bounded concurrency.
///
/// Each document runs in its own task. A semaphore sized
/// `min(documents, max_concurrency)` limits how many are in flight at once.
/// Outcomes are collected by input position, so the result order never
/// depends on which document finished first.
pub struct BatchOrchestrator {
    analyzer: Arc<DocumentAnalyzer>,
    max_concurrency: usize,
    batch_timeout: Option<Duration>,
}

impl BatchOrchestrator {
    pub fn new(
        client: Arc<dyn DetectionClient>,
        config: &AnalysisConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            analyzer: Arc::new(DocumentAnalyzer::new(client, config)),
            max_concurrency: config.max_concurrency,
            batch_timeout: config.batch_timeout(),
        })
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub async fn run_batch(&self, documents: Vec<Document>) -> Result<BatchResult, BatchError> {
        self.run_batch_with(documents, self.max_concurrency).await
    }

    /// Like [`run_batch`](Self::run_batch) with an explicit concurrency cap.
    ///
    /// Fails only when the cap is zero or when a non-empty batch produced no
    /// successful document.
    pub async fn run_batch_with(
        &self,
        documents: Vec<Document>,
        max_concurrency: usize,
    ) -> Result<BatchResult, BatchError> {
        if max_concurrency == 0 {
            let err = ConfigError::Invalid("max_concurrency must be at least 1".to_string());
            return Err(err.into());
        }

        let batch_id = Uuid::new_v4();
        let span = info_span!("batch", %batch_id, documents = documents.len());

        let result = self
            .execute(batch_id, documents, max_concurrency)
            .instrument(span)
            .await;

        if !result.documents.is_empty() && result.succeeded() == 0 {
            return Err(BatchError::NoDocumentSucceeded(Box::new(result)));
        }
        Ok(result)
    }

    async fn execute(
        &self,
        batch_id: Uuid,
        documents: Vec<Document>,
        max_concurrency: usize,
    ) -> BatchResult {
        let started = Instant::now();
        let total = documents.len();
        let bound = max_concurrency.min(total).max(1);
        let pool = Arc::new(Semaphore::new(bound));
        let deadline = self.batch_timeout.map(|limit| (started + limit, limit));

        info!(bound, "Starting batch");

        // Dropping the set aborts every task still running
        let mut tasks = JoinSet::new();
        let mut ids = Vec::with_capacity(total);
        for (index, document) in documents.into_iter().enumerate() {
            ids.push(document.id);
            let analyzer = Arc::clone(&self.analyzer);
            let pool = Arc::clone(&pool);
            let span = info_span!("document", document_id = document.id);

            let task = async move {
                let work = async {
                    let _permit = pool
                        .acquire()
                        .await
                        .map_err(|e| AnalysisError::TaskFailed(e.to_string()))?;
                    analyzer.analyze(&document).await
                };

                // The deadline covers the wait for a slot as well
                let result = match deadline {
                    Some((deadline, limit)) => timeout_at(deadline, work)
                        .await
                        .unwrap_or_else(|_| Err(AnalysisError::Timeout(limit))),
                    None => work.await,
                };
                (index, result)
            };
            tasks.spawn(task.instrument(span));
        }

        // Fan-in: one slot per input document, filled by input position
        let mut slots: Vec<Option<DocumentOutcome>> = (0..total).map(|_| None).collect();
        let mut panics = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(outcome(ids[index], result)),
                Err(e) => panics.push(e.to_string()),
            }
        }

        // A panicked task loses its index; it owns whichever slot is still empty
        let mut panics = panics.into_iter();
        let outcomes: Vec<DocumentOutcome> = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    let message = panics
                        .next()
                        .unwrap_or_else(|| "document task did not complete".to_string());
                    outcome(ids[index], Err(AnalysisError::TaskFailed(message)))
                })
            })
            .collect();

        let result = BatchResult::new(batch_id, outcomes, started.elapsed());
        info!(
            succeeded = result.succeeded(),
            failed = result.failed(),
            elapsed_ms = result.elapsed.as_millis() as u64,
            "Batch finished"
        );
        result
    }
}

fn outcome(document_id: usize, result: Result<DocumentResult, AnalysisError>) -> DocumentOutcome {
    match result {
        Ok(result) => DocumentOutcome::Success(result),
        Err(err) => {
            warn!(
                document_id,
                kind = ?err.kind(),
                error = %err,
                "Document analysis failed"
            );
            DocumentOutcome::Failure(DocumentFailure::new(document_id, &err))
        }
    }
}
