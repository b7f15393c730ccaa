//! Fuzzy matching of windows to a target application.
//!
//! Scores are additive and deterministic. Process identity dominates;
//! title and class evidence only breaks ties or stands in when no pid
//! corroboration exists.

pub mod scorer;
pub mod tokens;

pub use scorer::{ScoreWeights, Scored, Scorer};
pub use tokens::MatchTokens;
