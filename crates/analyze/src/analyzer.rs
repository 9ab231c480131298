use std::sync::Arc;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::document::{Document, DocumentResult, SentimentScore};
use crate::error::AnalysisError;
use aggregate::{EntityAggregator, KeyPhraseRanker, round_to};
use detect::{
    DetectionClient, Detector, LanguageCode, PiiEntity, SentimentScores, pick_dominant,
};

/// Runs every detector for one document and assembles the result.
///
/// Language detection runs first because every other detector needs its
/// answer. The remaining detectors then run concurrently; a result is only
/// built once all of them have succeeded.
pub struct DocumentAnalyzer {
    client: Arc<dyn DetectionClient>,
    entities: EntityAggregator,
    phrases: KeyPhraseRanker,
    top_n_key_phrases: usize,
    syntax_preview_size: usize,
    score_precision: u32,
    include_pii: bool,
    pii_language: Option<LanguageCode>,
}

impl DocumentAnalyzer {
    pub fn new(client: Arc<dyn DetectionClient>, config: &AnalysisConfig) -> Self {
        Self {
            client,
            entities: EntityAggregator::new(config.score_precision),
            phrases: KeyPhraseRanker::new(config.key_phrase_precision),
            top_n_key_phrases: config.top_n_key_phrases,
            syntax_preview_size: config.syntax_preview_size,
            score_precision: config.score_precision,
            include_pii: config.include_pii,
            pii_language: config.pii_language,
        }
    }

    /// Highest-confidence supported language for `text`.
    pub async fn resolve_language(&self, text: &str) -> Result<LanguageCode, AnalysisError> {
        let guesses = self
            .client
            .detect_dominant_language(text)
            .await
            .map_err(AnalysisError::LanguageDetection)?;

        let dominant = pick_dominant(&guesses).ok_or(AnalysisError::NoDominantLanguage)?;
        let language = LanguageCode::from_code(&dominant.language_code)?;

        info!(
            language = %language,
            confidence = dominant.score,
            candidates = guesses.len(),
            "Resolved dominant language"
        );
        Ok(language)
    }

    pub async fn analyze(&self, document: &Document) -> Result<DocumentResult, AnalysisError> {
        let text = document.text.as_str();

        // Step 1: language gates everything else
        let language = self.resolve_language(text).await?;

        // Step 2: fan out; the first failure cancels the rest
        let client = self.client.as_ref();
        let (mentions, phrases, sentiment, mut tokens, pii) = tokio::try_join!(
            async {
                client
                    .detect_entities(text, language)
                    .await
                    .map_err(AnalysisError::detection(Detector::Entities))
            },
            async {
                client
                    .detect_key_phrases(text, language)
                    .await
                    .map_err(AnalysisError::detection(Detector::KeyPhrases))
            },
            async {
                client
                    .detect_sentiment(text, language)
                    .await
                    .map_err(AnalysisError::detection(Detector::Sentiment))
            },
            async {
                client
                    .detect_syntax(text, language)
                    .await
                    .map_err(AnalysisError::detection(Detector::Syntax))
            },
            self.detect_pii(text, language),
        )?;

        debug!(
            mentions = mentions.len(),
            key_phrases = phrases.len(),
            syntax_tokens = tokens.len(),
            "Detector calls completed"
        );

        // Step 3: post-process
        let entities = self.entities.aggregate(&mentions);
        let key_phrases = self.phrases.top_n(&phrases, self.top_n_key_phrases);
        let sentiment = self.numeric_sentiment(sentiment);
        tokens.truncate(self.syntax_preview_size);
        let pii = pii.map(|hits| {
            let mentions: Vec<_> = hits.iter().map(|hit| hit.to_mention(text)).collect();
            self.entities.aggregate(&mentions)
        });

        Ok(DocumentResult {
            document_id: document.id,
            language,
            entities,
            key_phrases,
            sentiment,
            syntax: tokens,
            pii,
        })
    }

    async fn detect_pii(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<Option<Vec<PiiEntity>>, AnalysisError> {
        if !self.include_pii {
            return Ok(None);
        }

        let language = self.pii_language.unwrap_or(language);
        self.client
            .detect_pii_entities(text, language)
            .await
            .map(Some)
            .map_err(AnalysisError::detection(Detector::Pii))
    }

    /// Keep numeric labels only, rounded.
    fn numeric_sentiment(&self, raw: SentimentScores) -> SentimentScore {
        raw.into_iter()
            .filter_map(|(label, value)| {
                value
                    .as_f64()
                    .map(|score| (label, round_to(score, self.score_precision)))
            })
            .collect()
    }
}
