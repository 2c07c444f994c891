//! Article handlers
//!
//! Endpoints for writing, listing, reading and liking articles.

use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::domain::entities::{
    ArticleDraft, ArticleId, ArticleInfo, ArticleQuery, Page, PageRequest, User, UserId,
};
use crate::error::AppError;
use crate::AppState;

use super::extract::{
    parse_filter, ArticleListQuery, PageParams, PositiveId, ValidJson, ValidPath, ValidQuery,
};

/// POST /api/v1/docshund/forums
///
/// Create an article owned by the caller.
pub async fn create_article(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidJson(draft): ValidJson<ArticleDraft>,
) -> Result<Json<ArticleInfo>, AppError> {
    let info = state.article_service.create_article(&user, draft).await?;
    Ok(Json(info))
}

/// PATCH /api/v1/docshund/forums/:article_id
pub async fn update_article(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidPath(article_id): ValidPath<PositiveId>,
    ValidJson(draft): ValidJson<ArticleDraft>,
) -> Result<StatusCode, AppError> {
    state
        .article_service
        .update_article(&user, ArticleId(article_id.0), draft)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/docshund/forums
///
/// List visible articles. `filter` is either a category name or a document
/// name; see [`parse_filter`].
pub async fn get_articles(
    State(state): State<AppState>,
    viewer: Option<Extension<User>>,
    ValidQuery(query): ValidQuery<ArticleListQuery>,
    ValidQuery(page): ValidQuery<PageParams>,
) -> Result<Json<Page<ArticleInfo>>, AppError> {
    let (position, filter) = parse_filter(query.filter.as_deref());
    let query = ArticleQuery {
        sort: query.sort.unwrap_or_else(|| "latest".to_string()),
        position,
        filter,
        keyword: query.keyword.unwrap_or_default(),
        search_type: query.search_type.unwrap_or_default(),
    };

    let page = state
        .article_service
        .get_articles(viewer.as_ref().map(|v| &v.0), query, PageRequest::from(page))
        .await?;
    Ok(Json(page))
}

/// GET /api/v1/docshund/forums/user/:user_id
pub async fn get_articles_by_user(
    State(state): State<AppState>,
    viewer: Option<Extension<User>>,
    ValidPath(user_id): ValidPath<PositiveId>,
    ValidQuery(page): ValidQuery<PageParams>,
) -> Result<Json<Page<ArticleInfo>>, AppError> {
    let page = state
        .article_service
        .get_articles_by_user(
            viewer.as_ref().map(|v| &v.0),
            UserId(user_id.0),
            PageRequest::from(page),
        )
        .await?;
    Ok(Json(page))
}

/// GET /api/v1/docshund/forums/likes
///
/// Articles the caller liked.
pub async fn get_liked_articles(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidQuery(page): ValidQuery<PageParams>,
) -> Result<Json<Page<ArticleInfo>>, AppError> {
    let page = state
        .article_service
        .get_articles_liked_by_user(&user, PageRequest::from(page))
        .await?;
    Ok(Json(page))
}

/// GET /api/v1/docshund/forums/:article_id
pub async fn get_article(
    State(state): State<AppState>,
    viewer: Option<Extension<User>>,
    ValidPath(article_id): ValidPath<PositiveId>,
) -> Result<Json<ArticleInfo>, AppError> {
    let info = state
        .article_service
        .get_article_detail(viewer.as_ref().map(|v| &v.0), ArticleId(article_id.0))
        .await?;
    Ok(Json(info))
}

/// DELETE /api/v1/docshund/forums/:article_id
pub async fn delete_article(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidPath(article_id): ValidPath<PositiveId>,
) -> Result<StatusCode, AppError> {
    state
        .article_service
        .delete_article(&user, ArticleId(article_id.0))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/docshund/forums/:article_id/likes
///
/// Toggle the caller's like.
pub async fn like_article(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidPath(article_id): ValidPath<PositiveId>,
) -> Result<StatusCode, AppError> {
    state
        .article_service
        .like_article(&user, ArticleId(article_id.0))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
