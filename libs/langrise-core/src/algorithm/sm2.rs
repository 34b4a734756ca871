//! SM-2 spaced repetition algorithm.
//!
//! Classic SuperMemo 2: consecutive successful recalls stretch the interval
//! (1 day, 6 days, then previous interval times easiness), a failed recall
//! restarts the schedule, and easiness drifts with every graded review.
//! Intervals are capped at `maximum_interval` days.

use super::SpacedRepetitionAlgorithm;
use crate::types::{Quality, ReviewState};
use chrono::{DateTime, Duration, Utc};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_easiness: f64,
    pub minimum_easiness: f64,
    pub first_interval: u32,
    pub second_interval: u32,
    pub maximum_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_easiness: 2.5,
            minimum_easiness: 1.3,
            first_interval: 1,
            second_interval: 6,
            maximum_interval: 36_500,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn schedule(&self, prior: Option<&ReviewState>, quality: Quality, now: DateTime<Utc>) -> ReviewState {
        // A never-reviewed word starts from zero repetitions at the initial easiness.
        let (easiness, interval, repetitions) = match prior {
            Some(state) => (
                state.easiness.unwrap_or(self.initial_easiness),
                state.interval,
                state.repetitions,
            ),
            None => (self.initial_easiness, 0, 0),
        };

        let (new_interval, new_repetitions) = if quality.is_passing() {
            let repetitions = repetitions + 1;
            let interval = match repetitions {
                1 => self.first_interval,
                2 => self.second_interval,
                _ => (interval as f64 * easiness).round() as u32,
            };
            (interval.min(self.maximum_interval), repetitions)
        } else {
            (self.first_interval.min(self.maximum_interval), 0)
        };

        let next_review = now.checked_add_signed(Duration::days(i64::from(new_interval)));

        ReviewState {
            interval: new_interval,
            easiness: Some(self.next_easiness(easiness, quality)),
            repetitions: new_repetitions,
            last_reviewed: Some(now),
            next_review,
        }
    }
}

impl Sm2 {
    /// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored.
    fn next_easiness(&self, easiness: f64, quality: Quality) -> f64 {
        let q = quality.value() as f64;
        let delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
        (easiness + delta).max(self.minimum_easiness)
    }
}
