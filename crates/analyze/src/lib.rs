pub mod analyzer;
pub mod config;
pub mod document;
pub mod error;
pub mod orchestrator;

pub use analyzer::DocumentAnalyzer;
pub use config::{AnalysisConfig, MAX_PRECISION};
pub use document::{
    BatchResult, Document, DocumentFailure, DocumentOutcome, DocumentResult, SentimentScore,
};
pub use error::{AnalysisError, BatchError, ConfigError, FailureKind};
pub use orchestrator::BatchOrchestrator;
