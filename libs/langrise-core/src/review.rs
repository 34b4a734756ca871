//! Batch review processing.
//!
//! A review request groups attempts by game type:
//!
//! ```json
//! {
//!   "flashcards": [{ "word_id": 1, "rating": 3 }],
//!   "write_words": [{ "word_id": 2, "typed_word": "frendship" }]
//! }
//! ```
//!
//! Every attempt is validated, graded and scheduled on its own. A bad
//! attempt or an unknown game only produces an error entry; the rest of the
//! batch still goes through. Only a request with nothing to process at all is
//! rejected outright.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::algorithm::{Sm2, SpacedRepetitionAlgorithm};
use crate::error::{BatchError, ReviewError, StoreError};
use crate::matching;
use crate::types::{GameType, Quality, Word};

/// Access to the learner's words.
///
/// Implementations decide how a word is looked up and saved; the processor
/// only relies on ownership being enforced by `find_owned_word`.
pub trait WordStore: Send + Sync {
    /// Find a word that belongs to one of `owner`'s lists.
    fn find_owned_word(
        &self,
        word_id: i64,
        owner: i64,
    ) -> impl Future<Output = Result<Option<Word>, StoreError>> + Send;

    /// Save the word's review state.
    fn persist(&self, word: &Word) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// A word that was scheduled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSuccess {
    pub word_id: i64,
    pub next_review: DateTime<Utc>,
}

/// An attempt, or a whole game group, that could not be scheduled.
#[derive(Debug, PartialEq, Serialize)]
pub struct ReviewFailure {
    /// Game key the attempt was submitted under, as sent.
    pub game: String,
    pub word_id: Option<i64>,
    #[serde(rename = "message", serialize_with = "serialize_display")]
    pub reason: ReviewError,
}

impl ReviewFailure {
    fn new(game: impl Into<String>, word_id: Option<i64>, reason: ReviewError) -> Self {
        Self {
            game: game.into(),
            word_id,
            reason,
        }
    }
}

fn serialize_display<S: Serializer>(reason: &ReviewError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(reason)
}

/// Aggregate result of a review batch.
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// Every attempt was scheduled.
    Success { reviewed: Vec<ReviewSuccess> },
    /// Some attempts were scheduled and some failed.
    Partial {
        reviewed: Vec<ReviewSuccess>,
        errors: Vec<ReviewFailure>,
    },
    /// Nothing was scheduled.
    Failure { errors: Vec<ReviewFailure> },
}

impl BatchOutcome {
    /// Decide the outcome once every attempt has a result.
    pub fn from_results(results: Vec<Result<ReviewSuccess, ReviewFailure>>) -> Self {
        let mut reviewed = Vec::new();
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(success) => reviewed.push(success),
                Err(failure) => errors.push(failure),
            }
        }

        match (reviewed.is_empty(), errors.is_empty()) {
            (false, false) => Self::Partial { reviewed, errors },
            (true, false) => Self::Failure { errors },
            (_, true) => Self::Success { reviewed },
        }
    }

    pub fn reviewed(&self) -> &[ReviewSuccess] {
        match self {
            Self::Success { reviewed } | Self::Partial { reviewed, .. } => reviewed,
            Self::Failure { .. } => &[],
        }
    }

    pub fn errors(&self) -> &[ReviewFailure] {
        match self {
            Self::Partial { errors, .. } | Self::Failure { errors } => errors,
            Self::Success { .. } => &[],
        }
    }
}

/// Runs review batches against a word store.
pub struct ReviewProcessor<'a, S> {
    store: &'a S,
    algorithm: Box<dyn SpacedRepetitionAlgorithm>,
}

impl<'a, S: WordStore> ReviewProcessor<'a, S> {
    /// Processor scheduling with default SM-2.
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            algorithm: Box::new(Sm2::default()),
        }
    }

    pub fn with_algorithm(mut self, algorithm: impl SpacedRepetitionAlgorithm + 'static) -> Self {
        self.algorithm = Box::new(algorithm);
        self
    }

    /// Process every attempt in `request` on behalf of `owner`.
    pub async fn process_batch(
        &self,
        owner: i64,
        request: &Value,
        now: DateTime<Utc>,
    ) -> Result<BatchOutcome, BatchError> {
        let groups = request.as_object().ok_or(BatchError::NotAnObject)?;
        if groups.values().all(is_empty) {
            return Err(BatchError::Empty);
        }

        let mut results = Vec::new();
        for (key, items) in groups {
            let Some(game) = GameType::from_key(key) else {
                tracing::debug!(game = %key, "skipping unknown game type");
                results.push(Err(ReviewFailure::new(
                    key.as_str(),
                    None,
                    ReviewError::UnknownGame(key.clone()),
                )));
                continue;
            };

            match items {
                Value::Array(items) => {
                    for item in items {
                        results.push(self.process_item(game, owner, item, now).await);
                    }
                }
                other if is_empty(other) => {}
                _ => results.push(Err(ReviewFailure::new(
                    game.as_str(),
                    None,
                    ReviewError::GroupNotAList(game),
                ))),
            }
        }

        let outcome = BatchOutcome::from_results(results);
        tracing::info!(
            owner,
            reviewed = outcome.reviewed().len(),
            failed = outcome.errors().len(),
            "processed review batch"
        );
        Ok(outcome)
    }

    async fn process_item(
        &self,
        game: GameType,
        owner: i64,
        item: &Value,
        now: DateTime<Utc>,
    ) -> Result<ReviewSuccess, ReviewFailure> {
        let word_id = word_id(item).map_err(|reason| ReviewFailure::new(game.as_str(), None, reason))?;

        self.review_word(game, owner, word_id, item, now)
            .await
            .map_err(|reason| ReviewFailure::new(game.as_str(), Some(word_id), reason))
    }

    async fn review_word(
        &self,
        game: GameType,
        owner: i64,
        word_id: i64,
        item: &Value,
        now: DateTime<Utc>,
    ) -> Result<ReviewSuccess, ReviewError> {
        let mut word = self
            .store
            .find_owned_word(word_id, owner)
            .await
            .inspect_err(|err| tracing::warn!(word_id, error = %err, "word lookup failed"))?
            .ok_or(ReviewError::WordNotFound(word_id))?;

        let raw_quality = if game.is_typed() {
            let typed = typed_word(item)?;
            matching::grade(&word.word, typed).value() as i64
        } else {
            rating(item)?
        };
        let quality = Quality::new(raw_quality)
            .filter(|quality| quality.value() <= game.max_rating())
            .ok_or(ReviewError::RatingOutOfRange {
                quality: raw_quality,
                game,
            })?;

        word.review = self
            .algorithm
            .schedule(word.review.prior(), quality, now);

        self.store
            .persist(&word)
            .await
            .inspect_err(|err| tracing::warn!(word_id, error = %err, "saving review failed"))?;

        tracing::debug!(
            word_id,
            %game,
            %quality,
            interval = word.review.interval,
            algorithm = self.algorithm.name(),
            "scheduled word"
        );

        Ok(ReviewSuccess {
            word_id,
            next_review: word.review.next_review.unwrap_or(now),
        })
    }
}

/// Process a review batch with default SM-2 scheduling.
pub async fn process_batch<S: WordStore>(
    store: &S,
    owner: i64,
    request: &Value,
    now: DateTime<Utc>,
) -> Result<BatchOutcome, BatchError> {
    ReviewProcessor::new(store)
        .process_batch(owner, request, now)
        .await
}

/// Nothing to process: null, or an empty list, object or string.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn word_id(item: &Value) -> Result<i64, ReviewError> {
    let fields = item.as_object().ok_or(ReviewError::ItemNotAnObject)?;
    match fields.get("word_id") {
        None | Some(Value::Null) => Err(ReviewError::MissingWordId),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| ReviewError::InvalidWordId(n.to_string())),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| ReviewError::InvalidWordId(s.clone())),
        Some(other) => Err(ReviewError::InvalidWordId(other.to_string())),
    }
}

fn typed_word(item: &Value) -> Result<&str, ReviewError> {
    item.get("typed_word")
        .and_then(Value::as_str)
        .filter(|typed| !typed.is_empty())
        .ok_or(ReviewError::MissingTypedWord)
}

/// Self-reported rating, coerced to an integer.
///
/// Integers pass through, finite floats are truncated and strings must hold an
/// integer. Booleans and containers are rejected.
fn rating(item: &Value) -> Result<i64, ReviewError> {
    let value = match item.get("rating") {
        None | Some(Value::Null) => return Err(ReviewError::MissingRating),
        Some(value) => value,
    };

    let coerced = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    coerced.ok_or_else(|| ReviewError::InvalidRating(value.to_string()))
}
