//! Wire shapes returned by the detection backend.
//!
//! Field names follow the backend's PascalCase JSON. Unknown fields are
//! ignored so newer backend versions can add data without breaking us.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LanguageGuess {
    pub language_code: String,
    pub score: f64,
}

/// One entity occurrence, before aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityMention {
    pub text: String,
    #[serde(rename = "Type")]
    pub entity_type: String,
    pub score: f64,
}

impl EntityMention {
    pub fn new(text: impl Into<String>, entity_type: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            entity_type: entity_type.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawKeyPhrase {
    pub text: String,
    pub score: f64,
}

impl RawKeyPhrase {
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// Sentiment label -> value, exactly as the backend sent it.
///
/// Values are kept as raw JSON so that non-numeric fields can be dropped
/// during post-processing instead of failing deserialization.
pub type SentimentScores = IndexMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartOfSpeech {
    pub tag: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SyntaxToken {
    pub token_id: u32,
    pub text: String,
    pub begin_offset: usize,
    pub end_offset: usize,
    pub part_of_speech: PartOfSpeech,
}

/// PII hit. The backend reports character offsets instead of surface text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PiiEntity {
    #[serde(rename = "Type")]
    pub entity_type: String,
    pub score: f64,
    pub begin_offset: usize,
    pub end_offset: usize,
}

impl PiiEntity {
    /// Resolve the covered span of `text`, counting offsets in characters.
    pub fn surface_text(&self, text: &str) -> String {
        text.chars()
            .skip(self.begin_offset)
            .take(self.end_offset.saturating_sub(self.begin_offset))
            .collect()
    }

    pub fn to_mention(&self, text: &str) -> EntityMention {
        EntityMention::new(self.surface_text(text), self.entity_type.clone(), self.score)
    }
}
