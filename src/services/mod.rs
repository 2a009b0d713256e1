//! Collaborator services: completion provider client and score extraction

pub mod completion;
pub mod score;

pub use completion::{CompletionClient, CompletionError};
pub use score::{extract_score, passed, PASSING_SCORE};
