//! Comment handlers
//!
//! Endpoints for comments and replies on articles.

use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::domain::entities::{ArticleId, CommentDraft, CommentId, CommentInfo, User, UserId};
use crate::error::AppError;
use crate::AppState;

use super::extract::{PositiveId, ValidJson, ValidPath};

/// GET /api/v1/docshund/forums/:article_id/comments
///
/// Root comments with their replies nested.
pub async fn get_comments_by_article(
    State(state): State<AppState>,
    ValidPath(article_id): ValidPath<PositiveId>,
) -> Result<Json<Vec<CommentInfo>>, AppError> {
    let comments = state
        .comment_service
        .get_comments_by_article(ArticleId(article_id.0))
        .await?;
    Ok(Json(comments))
}

/// GET /api/v1/docshund/forums/comments/user/:user_id
pub async fn get_comments_by_user(
    State(state): State<AppState>,
    ValidPath(user_id): ValidPath<PositiveId>,
) -> Result<Json<Vec<CommentInfo>>, AppError> {
    let comments = state
        .comment_service
        .get_comments_by_user(UserId(user_id.0))
        .await?;
    Ok(Json(comments))
}

/// POST /api/v1/docshund/forums/:article_id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidPath(article_id): ValidPath<PositiveId>,
    ValidJson(draft): ValidJson<CommentDraft>,
) -> Result<Json<CommentInfo>, AppError> {
    let comment = state
        .comment_service
        .create_comment(&user, ArticleId(article_id.0), draft)
        .await?;
    Ok(Json(comment))
}

/// POST /api/v1/docshund/forums/:article_id/comments/:comment_id
///
/// Reply to a root comment.
pub async fn create_reply(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidPath((article_id, comment_id)): ValidPath<(PositiveId, PositiveId)>,
    ValidJson(draft): ValidJson<CommentDraft>,
) -> Result<Json<CommentInfo>, AppError> {
    let reply = state
        .comment_service
        .create_reply(
            &user,
            ArticleId(article_id.0),
            CommentId(comment_id.0),
            draft,
        )
        .await?;
    Ok(Json(reply))
}

/// PATCH /api/v1/docshund/forums/:article_id/comments/:comment_id
pub async fn update_comment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidPath((article_id, comment_id)): ValidPath<(PositiveId, PositiveId)>,
    ValidJson(draft): ValidJson<CommentDraft>,
) -> Result<StatusCode, AppError> {
    state
        .comment_service
        .update_comment(
            &user,
            ArticleId(article_id.0),
            CommentId(comment_id.0),
            draft,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/docshund/forums/:article_id/comments/:comment_id
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidPath((article_id, comment_id)): ValidPath<(PositiveId, PositiveId)>,
) -> Result<StatusCode, AppError> {
    state
        .comment_service
        .delete_comment(&user, ArticleId(article_id.0), CommentId(comment_id.0))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
