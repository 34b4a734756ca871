//! Word and words list endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/words
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<WordsQuery>,
) -> Result<Json<WordListResponse>> {
    if let Some(list_id) = query.words_list {
        state
            .db
            .get_owned_words_list(list_id, auth.user_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(
                    "The requested words list does not exist or you don't have access to it."
                        .to_string(),
                )
            })?;
    }

    let due_by = query.due.then(Utc::now);
    let words = state
        .db
        .get_words(auth.user_id, query.words_list, due_by)
        .await?;

    Ok(Json(WordListResponse {
        words: words.iter().map(DbWord::to_core_word).collect(),
    }))
}

/// GET /api/words-lists
pub async fn lists(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<WordsListsResponse>> {
    let words_lists = state.db.get_words_lists(auth.user_id).await?;
    Ok(Json(WordsListsResponse { words_lists }))
}
