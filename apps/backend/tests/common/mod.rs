//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up test environment with database
//! - Helpers for creating users, words lists and words
//! - Authentication helpers
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL env var).

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use sqlx::Row;

use langrise_backend::db::Database;
use langrise_backend::AppState;

/// Test context containing database connection and test router.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url, 5)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let db = Arc::new(db);
        let app = langrise_backend::app(AppState { db: db.clone() });

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a test user and return its ID and token.
    pub async fn create_test_user(&self) -> (i64, String) {
        let token = fixtures::unique_name("token");
        let row = sqlx::query(
            "INSERT INTO users (username, api_token) VALUES ($1, $2) RETURNING id",
        )
        .bind(fixtures::unique_name("learner"))
        .bind(&token)
        .fetch_one(self.db.pool())
        .await
        .expect("Failed to create test user");
        (row.get("id"), token)
    }

    /// Create a words list owned by the user.
    pub async fn create_words_list(&self, user_id: i64, name: &str) -> i64 {
        let row = sqlx::query("INSERT INTO words_lists (name, user_id) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(user_id)
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to create words list");
        row.get("id")
    }

    /// Create a never-reviewed word in a list.
    pub async fn create_word(&self, list_id: i64, word: &str, translation: &str) -> i64 {
        let row = sqlx::query(
            "INSERT INTO words (word, translation, words_list_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(word)
        .bind(translation)
        .bind(list_id)
        .fetch_one(self.db.pool())
        .await
        .expect("Failed to create word");
        row.get("id")
    }

    /// Read back a word's (interval_days, repetitions, easiness).
    pub async fn review_state(&self, word_id: i64) -> (i32, i32, Option<f64>) {
        let row = sqlx::query("SELECT interval_days, repetitions, easiness FROM words WHERE id = $1")
            .bind(word_id)
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to read word");
        (row.get("interval_days"), row.get("repetitions"), row.get("easiness"))
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Clean up test data for a user.
    ///
    /// Lists and words go with the user through ON DELETE CASCADE.
    pub async fn cleanup_user(&self, user_id: i64) {
        let _ = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;
    }
}
