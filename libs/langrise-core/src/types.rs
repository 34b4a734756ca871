//! Core types for the review engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quality of a single recall, 0 (blackout) to 5 (perfect).
///
/// Values of 3 and above count as a successful recall. Constructors never
/// produce a value outside the range, so the scheduler can trust its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;

    /// Create from a numeric grade, `None` when outside 0..=5.
    pub fn new(value: i64) -> Option<Self> {
        if (0..=Self::MAX as i64).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    /// Create from a grade, capping anything above the maximum.
    pub fn saturating(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this grade counts as a successful recall.
    pub fn is_passing(self) -> bool {
        self.0 >= 3
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Practice game a review was submitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    WriteWords,
    Story,
    MatchWords,
    Flashcards,
}

impl GameType {
    pub const ALL: [GameType; 4] = [
        Self::WriteWords,
        Self::Story,
        Self::MatchWords,
        Self::Flashcards,
    ];

    /// Highest quality this game is able to report.
    pub fn max_rating(self) -> u8 {
        match self {
            Self::WriteWords => 5,
            Self::Story => 4,
            Self::MatchWords => 4,
            Self::Flashcards => 3,
        }
    }

    /// Whether the learner types the word instead of self-rating.
    pub fn is_typed(self) -> bool {
        matches!(self, Self::WriteWords)
    }

    /// Get the game name as used in request keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WriteWords => "write_words",
            Self::Story => "story",
            Self::MatchWords => "match_words",
            Self::Flashcards => "flashcards",
        }
    }

    /// Parse from a request key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|game| game.as_str() == key)
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repetition state of a single word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    /// Days until the next review.
    pub interval: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easiness: Option<f64>,
    pub repetitions: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<DateTime<Utc>>,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            interval: 1,
            easiness: None,
            repetitions: 0,
            last_reviewed: None,
            next_review: None,
        }
    }
}

impl ReviewState {
    /// The state to schedule from, or `None` if the word was never reviewed.
    pub fn prior(&self) -> Option<&Self> {
        self.last_reviewed.map(|_| self)
    }
}

/// Vocabulary item owned by a learner through one of their lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    /// Text in the language being learned; typed answers are graded against it.
    pub word: String,
    pub translation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    pub words_list_id: i64,
    #[serde(flatten)]
    pub review: ReviewState,
}
