//! Moderation handlers
//!
//! Admin-only visibility switches. Ids here are not range-checked; unknown
//! ids surface as 404 from the service.

use axum::{extract::State, Extension};

use crate::domain::entities::{ArticleId, CommentId, Status, User};
use crate::error::AppError;
use crate::AppState;

use super::extract::{JsonBody, ValidPath};

/// Body returned by both status endpoints
pub const STATUS_CHANGED: &str = "변경이 완료되었습니다";

/// PATCH /api/v1/docshund/forums/article/:article_id/status
pub async fn modify_article_status(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidPath(article_id): ValidPath<i64>,
    JsonBody(status): JsonBody<Status>,
) -> Result<&'static str, AppError> {
    state
        .article_service
        .modify_article_status(&user, ArticleId(article_id), status)
        .await?;
    Ok(STATUS_CHANGED)
}

/// PATCH /api/v1/docshund/forums/comment/:comment_id/status
pub async fn modify_comment_status(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidPath(comment_id): ValidPath<i64>,
    JsonBody(status): JsonBody<Status>,
) -> Result<&'static str, AppError> {
    state
        .comment_service
        .modify_comment_status(&user, CommentId(comment_id), status)
        .await?;
    Ok(STATUS_CHANGED)
}
