//! Review scheduling engine for Langrise vocabulary practice.
//!
//! Provides:
//! - Typed-answer grading (longest-matching-block similarity)
//! - SM-2 spaced repetition scheduling
//! - Batch review processing across game types with per-item errors
//! - Shared types (Word, ReviewState, GameType, Quality)

pub mod algorithm;
pub mod error;
pub mod matching;
pub mod review;
pub mod types;

pub use algorithm::{Sm2, SpacedRepetitionAlgorithm};
pub use error::{BatchError, ReviewError, StoreError};
pub use matching::{compare_answers, grade, grade_for_similarity, similarity_ratio, MatchResult};
pub use review::{process_batch, BatchOutcome, ReviewFailure, ReviewProcessor, ReviewSuccess, WordStore};
pub use types::{GameType, Quality, ReviewState, Word};
