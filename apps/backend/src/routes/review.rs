//! Word review endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use langrise_core::{process_batch, BatchOutcome};
use serde_json::Value;

use crate::error::Result;
use crate::models::{PartialReviewResponse, ReviewErrorsResponse};
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/words-review/
///
/// Body maps game types to review attempts. Responds 200 when every attempt
/// was scheduled, 207 when only some were, and 400 when none were.
pub async fn review(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<Value>,
) -> Result<Response> {
    let outcome = process_batch(state.db.as_ref(), auth.user_id, &payload, Utc::now()).await?;

    if !outcome.errors().is_empty() {
        tracing::info!(
            user = %auth.username,
            failed = outcome.errors().len(),
            "review batch had rejected attempts"
        );
    }

    Ok(outcome_response(outcome))
}

/// Map a batch outcome to its HTTP status and body
pub fn outcome_response(outcome: BatchOutcome) -> Response {
    match outcome {
        BatchOutcome::Success { reviewed } => (StatusCode::OK, Json(reviewed)).into_response(),
        BatchOutcome::Partial { reviewed, errors } => (
            StatusCode::MULTI_STATUS,
            Json(PartialReviewResponse { reviewed, errors }),
        )
            .into_response(),
        BatchOutcome::Failure { errors } => {
            (StatusCode::BAD_REQUEST, Json(ReviewErrorsResponse { errors })).into_response()
        }
    }
}
