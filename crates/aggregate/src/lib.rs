pub mod entities;
pub mod phrases;
pub mod rounding;

pub use entities::{EntityAggregator, EntityEntry, EntityGroups};
pub use phrases::{KeyPhrase, KeyPhraseRanker};
pub use rounding::round_to;
