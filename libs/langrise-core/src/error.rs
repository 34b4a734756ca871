//! Error types for langrise-core.

use thiserror::Error;

use crate::types::GameType;

/// Reasons a whole review batch is rejected before any item is processed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("review request must be an object keyed by game type")]
    NotAnObject,

    #[error("review request contains no words")]
    Empty,
}

/// Why a single review attempt, or a whole game group, was not scheduled.
///
/// The `Display` output is the message returned to the learner.
#[derive(Debug, Error, PartialEq)]
pub enum ReviewError {
    #[error("unknown game type '{0}'")]
    UnknownGame(String),

    #[error("reviews for {0} must be a list")]
    GroupNotAList(GameType),

    #[error("review entry must be an object")]
    ItemNotAnObject,

    #[error("missing word_id")]
    MissingWordId,

    #[error("invalid word_id: {0}")]
    InvalidWordId(String),

    #[error("word {0} does not exist or you don't have access to it")]
    WordNotFound(i64),

    #[error("typed_word must be a non-empty string")]
    MissingTypedWord,

    #[error("missing rating")]
    MissingRating,

    #[error("rating must be an integer, got {0}")]
    InvalidRating(String),

    #[error("invalid rating {quality} for game {game}, allowed range is 0 to {}", game.max_rating())]
    RatingOutOfRange { quality: i64, game: GameType },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure reported by a word store.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("storage error: {message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Wrap any backend error, keeping only its message.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_limit() {
        let err = ReviewError::RatingOutOfRange {
            quality: 4,
            game: GameType::Flashcards,
        };
        assert_eq!(
            err.to_string(),
            "invalid rating 4 for game flashcards, allowed range is 0 to 3"
        );
    }

    #[test]
    fn store_error_is_transparent() {
        let err = ReviewError::from(StoreError::backend("connection reset"));
        assert_eq!(err.to_string(), "storage error: connection reset");
    }
}
