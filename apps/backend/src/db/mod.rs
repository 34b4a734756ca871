//! PostgreSQL database operations

use chrono::{DateTime, Utc};
use langrise_core::{StoreError, Word, WordStore};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::{ApiError, Result};
use crate::models::*;

const WORD_COLUMNS: &str = r#"
    w.id, w.word, w.translation, w.pronunciation, w.date_added, w.words_list_id,
    w.interval_days, w.easiness, w.repetitions, w.last_reviewed, w.next_review
"#;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Get user by API token
    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username
            FROM users
            WHERE api_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    // === Words List Repository ===

    /// Get all words lists of a user
    pub async fn get_words_lists(&self, user_id: i64) -> Result<Vec<DbWordsList>> {
        let lists = sqlx::query_as::<_, DbWordsList>(
            r#"
            SELECT id, name, date_created, user_id
            FROM words_lists
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lists)
    }

    /// Get a words list if it belongs to the user
    pub async fn get_owned_words_list(
        &self,
        list_id: i64,
        user_id: i64,
    ) -> Result<Option<DbWordsList>> {
        let list = sqlx::query_as::<_, DbWordsList>(
            r#"
            SELECT id, name, date_created, user_id
            FROM words_lists
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(list_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(list)
    }

    // === Word Repository ===

    /// Get a word if it belongs to one of the user's lists
    pub async fn get_owned_word(&self, word_id: i64, user_id: i64) -> Result<Option<DbWord>> {
        let word = sqlx::query_as::<_, DbWord>(&format!(
            r#"
            SELECT {WORD_COLUMNS}
            FROM words w
            JOIN words_lists l ON l.id = w.words_list_id
            WHERE w.id = $1 AND l.user_id = $2
            "#
        ))
        .bind(word_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(word)
    }

    /// Get the user's words, optionally from one list and only those due by `due_by`.
    ///
    /// Never-reviewed words come first, then by next review.
    pub async fn get_words(
        &self,
        user_id: i64,
        list_id: Option<i64>,
        due_by: Option<DateTime<Utc>>,
    ) -> Result<Vec<DbWord>> {
        let words = sqlx::query_as::<_, DbWord>(&format!(
            r#"
            SELECT {WORD_COLUMNS}
            FROM words w
            JOIN words_lists l ON l.id = w.words_list_id
            WHERE l.user_id = $1
              AND ($2::BIGINT IS NULL OR w.words_list_id = $2)
              AND ($3::TIMESTAMPTZ IS NULL OR w.next_review IS NULL OR w.next_review <= $3)
            ORDER BY w.next_review ASC NULLS FIRST, w.id
            "#
        ))
        .bind(user_id)
        .bind(list_id)
        .bind(due_by)
        .fetch_all(&self.pool)
        .await?;

        Ok(words)
    }

    /// Save a word's review state.
    ///
    /// One statement per word, so each review commits on its own.
    pub async fn update_review_state(&self, word: &Word) -> Result<()> {
        let state = &word.review;
        let interval = to_column("interval_days", state.interval)?;
        let repetitions = to_column("repetitions", state.repetitions)?;
        let result = sqlx::query(
            r#"
            UPDATE words
            SET interval_days = $2,
                easiness = $3,
                repetitions = $4,
                last_reviewed = $5,
                next_review = $6
            WHERE id = $1
            "#,
        )
        .bind(word.id)
        .bind(interval)
        .bind(state.easiness)
        .bind(repetitions)
        .bind(state.last_reviewed)
        .bind(state.next_review)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Word {}", word.id)));
        }

        Ok(())
    }
}

/// Convert a counter to its INTEGER column, refusing values that would not fit.
fn to_column(column: &str, value: u32) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| ApiError::Internal(format!("{} value {} does not fit the column", column, value)))
}

impl WordStore for Database {
    async fn find_owned_word(&self, word_id: i64, owner: i64) -> std::result::Result<Option<Word>, StoreError> {
        let word = self
            .get_owned_word(word_id, owner)
            .await
            .map_err(StoreError::backend)?;
        Ok(word.map(|w| w.to_core_word()))
    }

    async fn persist(&self, word: &Word) -> std::result::Result<(), StoreError> {
        self.update_review_state(word)
            .await
            .map_err(StoreError::backend)
    }
}
