#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use detect::{
    DetectionClient, Detector, EntityMention, LanguageCode, LanguageGuess, PartOfSpeech,
    PiiEntity, RawKeyPhrase, SentimentScores, ServiceError, SyntaxToken,
};

/// How the mock answers for one document text.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub languages: Option<Vec<LanguageGuess>>,
    pub fail: Option<Detector>,
    pub panic_on: Option<Detector>,
    pub delay: Duration,
}

impl Script {
    pub fn language(code: &str) -> Self {
        Self::default().with_languages(&[(code, 0.99)])
    }

    pub fn with_languages(mut self, guesses: &[(&str, f64)]) -> Self {
        self.languages = Some(
            guesses
                .iter()
                .map(|(code, score)| LanguageGuess {
                    language_code: code.to_string(),
                    score: *score,
                })
                .collect(),
        );
        self
    }

    pub fn failing(mut self, detector: Detector) -> Self {
        self.fail = Some(detector);
        self
    }

    pub fn panicking(mut self, detector: Detector) -> Self {
        self.panic_on = Some(detector);
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Scripted, instrumented detection backend.
///
/// Tracks how many documents (distinct texts) and how many calls are in
/// flight at once, and records every call with the language it used.
#[derive(Default)]
pub struct ScriptedClient {
    scripts: HashMap<String, Script>,
    fallback: Script,
    in_flight: Mutex<HashMap<String, usize>>,
    max_documents_in_flight: AtomicUsize,
    calls_in_flight: AtomicUsize,
    max_calls_in_flight: AtomicUsize,
    calls: Mutex<Vec<(String, Detector, Option<LanguageCode>)>>,
}

struct CallGuard<'a> {
    client: &'a ScriptedClient,
    text: String,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.client.calls_in_flight.fetch_sub(1, Ordering::SeqCst);
        let mut in_flight = self.client.in_flight.lock().unwrap();
        if let Some(count) = in_flight.get_mut(&self.text) {
            *count -= 1;
            if *count == 0 {
                in_flight.remove(&self.text);
            }
        }
    }
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            fallback: Script::language("en"),
            ..Self::default()
        }
    }

    pub fn with(mut self, text: &str, script: Script) -> Self {
        self.scripts.insert(text.to_string(), script);
        self
    }

    pub fn with_fallback(mut self, script: Script) -> Self {
        self.fallback = script;
        self
    }

    pub fn max_documents_in_flight(&self) -> usize {
        self.max_documents_in_flight.load(Ordering::SeqCst)
    }

    pub fn max_calls_in_flight(&self) -> usize {
        self.max_calls_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<(String, Detector, Option<LanguageCode>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, text: &str) -> Vec<Detector> {
        self.calls()
            .into_iter()
            .filter(|(t, _, _)| t == text)
            .map(|(_, detector, _)| detector)
            .collect()
    }

    fn script(&self, text: &str) -> Script {
        self.scripts.get(text).cloned().unwrap_or_else(|| self.fallback.clone())
    }

    fn enter(&self, text: &str, detector: Detector, language: Option<LanguageCode>) -> CallGuard<'_> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), detector, language));

        let calls = self.calls_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_calls_in_flight.fetch_max(calls, Ordering::SeqCst);

        let mut in_flight = self.in_flight.lock().unwrap();
        *in_flight.entry(text.to_string()).or_insert(0) += 1;
        self.max_documents_in_flight
            .fetch_max(in_flight.len(), Ordering::SeqCst);

        CallGuard {
            client: self,
            text: text.to_string(),
        }
    }

    /// Shared prologue for every call: record, fail or panic as scripted,
    /// otherwise wait out the scripted delay.
    async fn step(
        &self,
        text: &str,
        detector: Detector,
        language: Option<LanguageCode>,
    ) -> Result<CallGuard<'_>, ServiceError> {
        let guard = self.enter(text, detector, language);
        let script = self.script(text);

        if script.panic_on == Some(detector) {
            panic!("scripted panic in {detector}");
        }
        if script.fail == Some(detector) {
            return Err(ServiceError::Backend(format!("scripted {detector} failure")));
        }
        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }
        Ok(guard)
    }
}

/// First whitespace-separated word, used as the canned entity text.
pub fn first_word(text: &str) -> String {
    text.split_whitespace().next().unwrap_or("").to_string()
}

#[async_trait]
impl DetectionClient for ScriptedClient {
    async fn detect_dominant_language(
        &self,
        text: &str,
    ) -> Result<Vec<LanguageGuess>, ServiceError> {
        let _guard = self.step(text, Detector::Language, None).await?;
        Ok(self.script(text).languages.unwrap_or_default())
    }

    async fn detect_entities(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<Vec<EntityMention>, ServiceError> {
        let _guard = self.step(text, Detector::Entities, Some(language)).await?;
        let word = first_word(text);
        Ok(vec![
            EntityMention::new(word.clone(), "OTHER", 0.81234567),
            EntityMention::new("Brasil", "LOCATION", 0.9802322387695312),
            EntityMention::new(word, "OTHER", 0.95),
        ])
    }

    async fn detect_key_phrases(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<Vec<RawKeyPhrase>, ServiceError> {
        let _guard = self.step(text, Detector::KeyPhrases, Some(language)).await?;
        // 40 phrases with ascending scores
        Ok((0..40)
            .map(|i| RawKeyPhrase::new(format!("phrase-{i}"), f64::from(i) / 100.0 + 0.000001))
            .collect())
    }

    async fn detect_sentiment(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<SentimentScores, ServiceError> {
        let _guard = self.step(text, Detector::Sentiment, Some(language)).await?;
        let mut scores = SentimentScores::new();
        scores.insert("Positive".to_string(), serde_json::json!(0.912345678));
        scores.insert("Negative".to_string(), serde_json::json!(0.01234));
        scores.insert("Neutral".to_string(), serde_json::json!(0.0612));
        scores.insert("Mixed".to_string(), serde_json::json!(0.01426));
        scores.insert("Sentiment".to_string(), serde_json::json!("POSITIVE"));
        Ok(scores)
    }

    async fn detect_syntax(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<Vec<SyntaxToken>, ServiceError> {
        let _guard = self.step(text, Detector::Syntax, Some(language)).await?;
        Ok((0..12)
            .map(|i| SyntaxToken {
                token_id: i + 1,
                text: format!("tok{i}"),
                begin_offset: i as usize * 4,
                end_offset: i as usize * 4 + 3,
                part_of_speech: PartOfSpeech {
                    tag: "NOUN".to_string(),
                    score: 0.99,
                },
            })
            .collect())
    }

    async fn detect_pii_entities(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<Vec<PiiEntity>, ServiceError> {
        let _guard = self.step(text, Detector::Pii, Some(language)).await?;
        let len = first_word(text).chars().count();
        Ok(vec![
            PiiEntity {
                entity_type: "NAME".to_string(),
                score: 0.99991,
                begin_offset: 0,
                end_offset: len,
            },
            PiiEntity {
                entity_type: "NAME".to_string(),
                score: 0.5,
                begin_offset: 0,
                end_offset: len,
            },
        ])
    }
}
