use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::document::BatchResult;
use detect::{Detector, ServiceError, UnsupportedLanguage};

/// Why a single document could not be analyzed.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("language detection failed: {0}")]
    LanguageDetection(#[source] ServiceError),

    #[error("no dominant language detected")]
    NoDominantLanguage,

    #[error(transparent)]
    UnsupportedLanguage(#[from] UnsupportedLanguage),

    #[error("{detector} detection failed: {source}")]
    Detection {
        detector: Detector,
        #[source]
        source: ServiceError,
    },

    #[error("analysis timed out after {0:?}")]
    Timeout(Duration),

    #[error("worker task failed: {0}")]
    TaskFailed(String),
}

/// Coarse classification of a per-document failure, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Service,
    NoLanguage,
    UnsupportedLanguage,
    Detection,
    Timeout,
    Internal,
}

impl AnalysisError {
    pub(crate) fn detection(detector: Detector) -> impl FnOnce(ServiceError) -> AnalysisError {
        move |source| AnalysisError::Detection { detector, source }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            AnalysisError::LanguageDetection(_) => FailureKind::Service,
            AnalysisError::NoDominantLanguage => FailureKind::NoLanguage,
            AnalysisError::UnsupportedLanguage(_) => FailureKind::UnsupportedLanguage,
            AnalysisError::Detection { .. } => FailureKind::Detection,
            AnalysisError::Timeout(_) => FailureKind::Timeout,
            AnalysisError::TaskFailed(_) => FailureKind::Internal,
        }
    }

    /// The detector whose call failed, if the failure came from one.
    pub fn detector(&self) -> Option<Detector> {
        match self {
            AnalysisError::LanguageDetection(_) => Some(Detector::Language),
            AnalysisError::Detection { detector, .. } => Some(*detector),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum BatchError {
    /// Every document failed. The full result is kept so callers can still
    /// report each failure.
    #[error("no document in batch {} succeeded ({} failed)", .0.batch_id, .0.failed())]
    NoDocumentSucceeded(Box<BatchResult>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
