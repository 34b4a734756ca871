//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Re-export shared types from langrise-core
pub use langrise_core::{ReviewFailure, ReviewState, ReviewSuccess, Word};

// === Database Entity Types ===

/// Learner account, as far as this service needs it
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// Words list stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWordsList {
    pub id: i64,
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub user_id: i64,
}

/// Word stored in PostgreSQL, including its review state
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWord {
    pub id: i64,
    pub word: String,
    pub translation: String,
    pub pronunciation: Option<String>,
    pub date_added: DateTime<Utc>,
    pub words_list_id: i64,
    pub interval_days: i32,
    pub easiness: Option<f64>,
    pub repetitions: i32,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: Option<DateTime<Utc>>,
}

impl DbWord {
    /// Convert to langrise-core Word
    pub fn to_core_word(&self) -> Word {
        Word {
            id: self.id,
            word: self.word.clone(),
            translation: self.translation.clone(),
            pronunciation: self.pronunciation.clone(),
            words_list_id: self.words_list_id,
            review: ReviewState {
                interval: self.interval_days.max(0) as u32,
                easiness: self.easiness,
                repetitions: self.repetitions.max(0) as u32,
                last_reviewed: self.last_reviewed,
                next_review: self.next_review,
            },
        }
    }
}

// === API Request/Response Types ===

// Review types
/// Body of a 207 response: what was scheduled and what was not
#[derive(Debug, Serialize)]
pub struct PartialReviewResponse {
    pub reviewed: Vec<ReviewSuccess>,
    pub errors: Vec<ReviewFailure>,
}

/// Body of a 400 response when no attempt could be scheduled
#[derive(Debug, Serialize)]
pub struct ReviewErrorsResponse {
    pub errors: Vec<ReviewFailure>,
}

// Word types
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WordsQuery {
    #[serde(rename = "words-list")]
    pub words_list: Option<i64>,
    /// Only never-reviewed words and words whose review is due
    #[serde(default)]
    pub due: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordListResponse {
    pub words: Vec<Word>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordsListsResponse {
    pub words_lists: Vec<DbWordsList>,
}
