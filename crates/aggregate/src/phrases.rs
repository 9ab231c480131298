use serde::{Deserialize, Serialize};

use crate::rounding::round_to;
use detect::RawKeyPhrase;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPhrase {
    pub text: String,
    pub score: f64,
}

/// Picks the highest-confidence key phrases.
#[derive(Debug, Clone)]
pub struct KeyPhraseRanker {
    precision: u32,
}

impl Default for KeyPhraseRanker {
    fn default() -> Self {
        Self::new(5)
    }
}

impl KeyPhraseRanker {
    pub fn new(precision: u32) -> Self {
        Self { precision }
    }

    /// At most `n` phrases, best first. Equal rounded scores keep their input
    /// order.
    pub fn top_n(&self, phrases: &[RawKeyPhrase], n: usize) -> Vec<KeyPhrase> {
        let mut ranked: Vec<KeyPhrase> = phrases
            .iter()
            .map(|p| KeyPhrase {
                text: p.text.clone(),
                score: round_to(p.score, self.precision),
            })
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str, score: f64) -> RawKeyPhrase {
        RawKeyPhrase::new(text, score)
    }

    fn texts(phrases: &[KeyPhrase]) -> Vec<&str> {
        phrases.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranker = KeyPhraseRanker::default();
        let top = ranker.top_n(&[raw("x", 0.1), raw("y", 0.9), raw("z", 0.9)], 2);

        assert_eq!(
            top,
            vec![
                KeyPhrase { text: "y".to_string(), score: 0.9 },
                KeyPhrase { text: "z".to_string(), score: 0.9 },
            ]
        );
    }

    #[test]
    fn test_ties_are_decided_after_rounding() {
        let ranker = KeyPhraseRanker::default();
        // 0.999991 and 0.999994 both round to 0.99999.
        let top = ranker.top_n(&[raw("first", 0.999991), raw("second", 0.999994)], 2);

        assert_eq!(texts(&top), vec!["first", "second"]);
        assert_eq!(top[0].score, 0.99999);
    }

    #[test]
    fn test_descending_order_and_truncation() {
        let ranker = KeyPhraseRanker::default();
        let phrases = [
            raw("riscos", 0.42),
            raw("outros países", 0.99),
            raw("a ideia", 0.87),
            raw("ações", 0.93),
        ];

        assert_eq!(
            texts(&ranker.top_n(&phrases, 3)),
            vec!["outros países", "ações", "a ideia"]
        );
        assert_eq!(ranker.top_n(&phrases, 30).len(), 4);
        assert!(ranker.top_n(&phrases, 0).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(KeyPhraseRanker::default().top_n(&[], 5).is_empty());
    }
}
