use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::client::{DetectionClient, Detector};
use crate::error::ServiceError;
use crate::language::LanguageCode;
use crate::retry::{RetryConfig, RetryPolicy};
use crate::schema::{
    EntityMention, LanguageGuess, PiiEntity, RawKeyPhrase, SentimentScores, SyntaxToken,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub retry: RetryConfig,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4566".to_string(),
            request_timeout_secs: 30,
            retry: RetryConfig::default(),
        }
    }
}

/// JSON-over-HTTP detection backend client.
#[derive(Clone)]
pub struct HttpDetectionClient {
    base_url: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DetectRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    language_code: Option<LanguageCode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LanguagesResponse {
    languages: Vec<LanguageGuess>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EntitiesResponse {
    entities: Vec<EntityMention>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct KeyPhrasesResponse {
    key_phrases: Vec<RawKeyPhrase>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SentimentResponse {
    sentiment_score: SentimentScores,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SyntaxResponse {
    syntax_tokens: Vec<SyntaxToken>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PiiResponse {
    entities: Vec<PiiEntity>,
}

impl HttpDetectionClient {
    pub fn new(config: &HttpClientConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ServiceError::Transport {
                operation: "client-init",
                message: e.to_string(),
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            retry: RetryPolicy::from_config(&config.retry),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<T: DeserializeOwned>(
        &self,
        detector: Detector,
        text: &str,
        language: Option<LanguageCode>,
    ) -> Result<T, ServiceError> {
        let request = DetectRequest {
            text,
            language_code: language,
        };

        self.retry
            .retry(
                detector.operation(),
                || self.send(detector, &request),
                ServiceError::is_transient,
            )
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        detector: Detector,
        request: &DetectRequest<'_>,
    ) -> Result<T, ServiceError> {
        let operation = detector.operation();
        let url = format!("{}/{}", self.base_url, operation);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::Transport {
                operation,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        debug!(operation, status = status.as_u16(), "Detection call completed");

        response.json::<T>().await.map_err(|e| ServiceError::Decode {
            operation,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl DetectionClient for HttpDetectionClient {
    async fn detect_dominant_language(
        &self,
        text: &str,
    ) -> Result<Vec<LanguageGuess>, ServiceError> {
        let response: LanguagesResponse = self.call(Detector::Language, text, None).await?;
        Ok(response.languages)
    }

    async fn detect_entities(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<Vec<EntityMention>, ServiceError> {
        let response: EntitiesResponse =
            self.call(Detector::Entities, text, Some(language)).await?;
        Ok(response.entities)
    }

    async fn detect_key_phrases(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<Vec<RawKeyPhrase>, ServiceError> {
        let response: KeyPhrasesResponse =
            self.call(Detector::KeyPhrases, text, Some(language)).await?;
        Ok(response.key_phrases)
    }

    async fn detect_sentiment(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<SentimentScores, ServiceError> {
        let response: SentimentResponse =
            self.call(Detector::Sentiment, text, Some(language)).await?;
        Ok(response.sentiment_score)
    }

    async fn detect_syntax(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<Vec<SyntaxToken>, ServiceError> {
        let response: SyntaxResponse = self.call(Detector::Syntax, text, Some(language)).await?;
        Ok(response.syntax_tokens)
    }

    async fn detect_pii_entities(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<Vec<PiiEntity>, ServiceError> {
        let response: PiiResponse = self.call(Detector::Pii, text, Some(language)).await?;
        Ok(response.entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(DetectRequest {
            text: "Olá mundo",
            language_code: Some(LanguageCode::Pt),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"Text": "Olá mundo", "LanguageCode": "pt"}));

        let body = serde_json::to_value(DetectRequest {
            text: "hello",
            language_code: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"Text": "hello"}));
    }

    #[test]
    fn test_sentiment_response_keeps_raw_values() {
        let json = r#"{
            "Sentiment": "POSITIVE",
            "SentimentScore": {"Positive": 0.91, "Negative": 0.01, "Neutral": 0.07, "Mixed": 0.01}
        }"#;
        let response: SentimentResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.sentiment_score.len(), 4);
        assert_eq!(response.sentiment_score["Positive"].as_f64(), Some(0.91));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = HttpClientConfig {
            base_url: "http://detector:8080/".to_string(),
            ..HttpClientConfig::default()
        };
        let client = HttpDetectionClient::new(&config).unwrap();

        assert_eq!(client.base_url(), "http://detector:8080");
    }
}
