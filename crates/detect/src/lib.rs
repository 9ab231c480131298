pub mod client;
pub mod error;
pub mod http;
pub mod language;
pub mod retry;
pub mod schema;

pub use client::{DetectionClient, Detector};
pub use error::ServiceError;
pub use http::{HttpClientConfig, HttpDetectionClient};
pub use language::{LanguageCode, UnsupportedLanguage, pick_dominant};
pub use retry::{RetryConfig, RetryPolicy};
pub use schema::{
    EntityMention, LanguageGuess, PartOfSpeech, PiiEntity, RawKeyPhrase, SentimentScores,
    SyntaxToken,
};
