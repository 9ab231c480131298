use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::error::{AnalysisError, FailureKind};
use aggregate::{EntityGroups, KeyPhrase, round_to};
use detect::{Detector, LanguageCode, SyntaxToken};

/// Input text plus its position in the upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: usize,
    pub text: String,
}

impl Document {
    pub fn new(id: usize, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    /// Number documents by their position in `texts`.
    pub fn from_texts<I, S>(texts: I) -> Vec<Document>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(id, text)| Document::new(id, text))
            .collect()
    }
}

/// Sentiment label -> rounded confidence.
pub type SentimentScore = IndexMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub document_id: usize,
    pub language: LanguageCode,
    pub entities: EntityGroups,
    pub key_phrases: Vec<KeyPhrase>,
    pub sentiment: SentimentScore,
    pub syntax: Vec<SyntaxToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pii: Option<EntityGroups>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub document_id: usize,
    pub kind: FailureKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detector: Option<Detector>,
    pub error: String,
}

impl DocumentFailure {
    pub fn new(document_id: usize, error: &AnalysisError) -> Self {
        Self {
            document_id,
            kind: error.kind(),
            detector: error.detector(),
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    Success(DocumentResult),
    Failure(DocumentFailure),
}

impl DocumentOutcome {
    pub fn document_id(&self) -> usize {
        match self {
            DocumentOutcome::Success(result) => result.document_id,
            DocumentOutcome::Failure(failure) => failure.document_id,
        }
    }
}

/// Everything a batch produced, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub batch_id: Uuid,
    pub documents: Vec<DocumentOutcome>,
    /// Wall-clock seconds for the whole batch.
    #[serde(rename = "totalTime")]
    pub total_time: f64,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl BatchResult {
    pub fn new(batch_id: Uuid, documents: Vec<DocumentOutcome>, elapsed: Duration) -> Self {
        Self {
            batch_id,
            documents,
            total_time: round_to(elapsed.as_secs_f64(), 4),
            elapsed,
        }
    }

    pub fn successes(&self) -> impl Iterator<Item = &DocumentResult> {
        self.documents.iter().filter_map(|outcome| match outcome {
            DocumentOutcome::Success(result) => Some(result),
            DocumentOutcome::Failure(_) => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &DocumentFailure> {
        self.documents.iter().filter_map(|outcome| match outcome {
            DocumentOutcome::Failure(failure) => Some(failure),
            DocumentOutcome::Success(_) => None,
        })
    }

    pub fn succeeded(&self) -> usize {
        self.successes().count()
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }
}
