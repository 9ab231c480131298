use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;
use detect::LanguageCode;

/// Decimal places an f64 score can carry meaningfully.
pub const MAX_PRECISION: u32 = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Upper bound on documents analyzed at the same time.
    pub max_concurrency: usize,
    pub top_n_key_phrases: usize,
    /// Number of syntax tokens kept per document.
    pub syntax_preview_size: usize,
    /// Decimal places for entity and sentiment scores.
    pub score_precision: u32,
    pub key_phrase_precision: u32,
    pub batch_timeout_ms: Option<u64>,
    pub include_pii: bool,
    /// Language for PII detection; the detected language when unset.
    pub pii_language: Option<LanguageCode>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 10,
            top_n_key_phrases: 30,
            syntax_preview_size: 5,
            score_precision: 4,
            key_phrase_precision: 5,
            batch_timeout_ms: None,
            include_pii: false,
            pii_language: None,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        for (name, digits) in [
            ("score_precision", self.score_precision),
            ("key_phrase_precision", self.key_phrase_precision),
        ] {
            if digits > MAX_PRECISION {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be at most {MAX_PRECISION}, got {digits}"
                )));
            }
        }
        if self.batch_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "batch_timeout_ms must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn batch_timeout(&self) -> Option<Duration> {
        self.batch_timeout_ms.map(Duration::from_millis)
    }
}
