use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::rounding::round_to;
use detect::EntityMention;

/// One distinct surface form within an entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityEntry {
    pub text: String,
    #[serde(rename = "score")]
    pub max_score: f64,
    #[serde(rename = "count")]
    pub occurrence_count: usize,
}

/// Entity type -> distinct entries, both in first-seen order.
pub type EntityGroups = IndexMap<String, Vec<EntityEntry>>;

/// Merges repeated mentions of the same text within an entity type.
///
/// Texts are compared verbatim; `"Brasil"` and `"brasil"` are different
/// entries. Scores are rounded before they are compared or stored so the
/// output does not depend on float noise from the backend.
#[derive(Debug, Clone)]
pub struct EntityAggregator {
    precision: u32,
}

impl Default for EntityAggregator {
    fn default() -> Self {
        Self::new(4)
    }
}

impl EntityAggregator {
    pub fn new(precision: u32) -> Self {
        Self { precision }
    }

    pub fn aggregate(&self, mentions: &[EntityMention]) -> EntityGroups {
        let mut groups = EntityGroups::new();

        for mention in mentions {
            let score = round_to(mention.score, self.precision);
            let entries = groups.entry(mention.entity_type.clone()).or_default();

            match entries.iter_mut().find(|e| e.text == mention.text) {
                Some(entry) => {
                    entry.max_score = entry.max_score.max(score);
                    entry.occurrence_count += 1;
                }
                None => entries.push(EntityEntry {
                    text: mention.text.clone(),
                    max_score: score,
                    occurrence_count: 1,
                }),
            }
        }

        groups
    }
}
