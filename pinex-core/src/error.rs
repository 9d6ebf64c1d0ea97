//! Error taxonomy shared by the study crates.
//!
//! - [`GuessError`]: malformed input, recoverable by re-prompting.
//! - [`SequenceError`]: participant/condition routing inconsistency, blocking.
//! - [`CatalogueError`]: stimulus lookup failed, blocking, no retry.

use crate::condition::Condition;

/// A submitted guess that never reaches scoring. The caller clears its input
/// buffer and re-prompts; no record is appended and the attempt counter does
/// not move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    #[error("please enter a guess")]
    EmptyGuess,

    #[error("guess must be exactly 4 digits, got {0:?}")]
    NotFourDigits(String),
}

/// Participant or condition routing that cannot be sequenced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("invalid participant number: {0}")]
    InvalidParticipant(u32),

    #[error("condition {0:?} is not part of this session's order")]
    InvalidCondition(String),
}

/// Stimulus catalogue lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    #[error("failed to load videos for condition {condition}: {reason}")]
    Unavailable { condition: Condition, reason: String },

    #[error("no videos found for condition {condition}")]
    EmptySet { condition: Condition },
}
