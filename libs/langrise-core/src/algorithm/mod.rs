//! Spaced repetition algorithm implementations.

pub mod sm2;

use crate::types::{Quality, ReviewState};
use chrono::{DateTime, Utc};

pub use sm2::Sm2;

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the next review state after a review.
    ///
    /// `prior` is `None` for a word that has never been reviewed.
    fn schedule(&self, prior: Option<&ReviewState>, quality: Quality, now: DateTime<Utc>) -> ReviewState;
}
