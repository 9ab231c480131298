use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ServiceError;
use crate::language::LanguageCode;
use crate::schema::{
    EntityMention, LanguageGuess, PiiEntity, RawKeyPhrase, SentimentScores, SyntaxToken,
};

/// One remote analysis capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Detector {
    Language,
    Entities,
    KeyPhrases,
    Sentiment,
    Syntax,
    Pii,
}

impl Detector {
    pub fn as_str(self) -> &'static str {
        match self {
            Detector::Language => "language",
            Detector::Entities => "entities",
            Detector::KeyPhrases => "key_phrases",
            Detector::Sentiment => "sentiment",
            Detector::Syntax => "syntax",
            Detector::Pii => "pii",
        }
    }

    /// Backend operation path for this detector.
    pub fn operation(self) -> &'static str {
        match self {
            Detector::Language => "detect-dominant-language",
            Detector::Entities => "detect-entities",
            Detector::KeyPhrases => "detect-key-phrases",
            Detector::Sentiment => "detect-sentiment",
            Detector::Syntax => "detect-syntax",
            Detector::Pii => "detect-pii-entities",
        }
    }
}

impl fmt::Display for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request/response access to the detection backend.
///
/// Implementations must be safe to call concurrently; no call may depend on
/// state left behind by a previous one.
#[async_trait]
pub trait DetectionClient: Send + Sync {
    async fn detect_dominant_language(&self, text: &str)
    -> Result<Vec<LanguageGuess>, ServiceError>;

    async fn detect_entities(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<Vec<EntityMention>, ServiceError>;

    async fn detect_key_phrases(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<Vec<RawKeyPhrase>, ServiceError>;

    async fn detect_sentiment(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<SentimentScores, ServiceError>;

    async fn detect_syntax(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<Vec<SyntaxToken>, ServiceError>;

    async fn detect_pii_entities(
        &self,
        _text: &str,
        _language: LanguageCode,
    ) -> Result<Vec<PiiEntity>, ServiceError> {
        Err(ServiceError::Unsupported {
            operation: Detector::Pii.operation(),
        })
    }
}
