use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::schema::LanguageGuess;

/// Languages the detection backend can analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    Es,
    Fr,
    De,
    It,
    Pt,
    Ja,
    Zh,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("language '{code}' is not supported")]
pub struct UnsupportedLanguage {
    pub code: String,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 8] = [
        LanguageCode::En,
        LanguageCode::Es,
        LanguageCode::Fr,
        LanguageCode::De,
        LanguageCode::It,
        LanguageCode::Pt,
        LanguageCode::Ja,
        LanguageCode::Zh,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Es => "es",
            LanguageCode::Fr => "fr",
            LanguageCode::De => "de",
            LanguageCode::It => "it",
            LanguageCode::Pt => "pt",
            LanguageCode::Ja => "ja",
            LanguageCode::Zh => "zh",
        }
    }

    /// Map a raw detector code onto the supported set. Matching is exact:
    /// regional variants such as `zh-TW` are rejected, never defaulted.
    pub fn from_code(code: &str) -> Result<Self, UnsupportedLanguage> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == code)
            .ok_or_else(|| UnsupportedLanguage {
                code: code.to_string(),
            })
    }
}

impl FromStr for LanguageCode {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Highest-scoring guess; the earliest one wins a tie. Non-finite scores
/// never win.
pub fn pick_dominant(guesses: &[LanguageGuess]) -> Option<&LanguageGuess> {
    guesses
        .iter()
        .filter(|guess| guess.score.is_finite())
        .fold(None, |best, guess| match best {
            Some(current) if current.score.total_cmp(&guess.score).is_ge() => Some(current),
            _ => Some(guess),
        })
}
