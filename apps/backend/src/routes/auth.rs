//! Authentication middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::{ApiError, Result};
use crate::AppState;

/// Authenticated user info stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
}

/// Auth middleware - resolves the bearer token to the owning user
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = bearer_token(auth_header)
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization format".to_string()))?;

    let user = state
        .db
        .get_user_by_token(token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
    });

    Ok(next.run(request).await)
}

/// Extract the token from a `Bearer <token>` header value
fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
