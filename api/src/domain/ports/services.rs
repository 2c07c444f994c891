//! Service port traits
//!
//! The HTTP layer only talks to these three collaborators. The application
//! layer provides the real implementations; tests substitute fakes.

use async_trait::async_trait;

use crate::domain::entities::{
    ArticleDraft, ArticleId, ArticleInfo, ArticleQuery, CommentDraft, CommentId, CommentInfo, Page,
    PageRequest, Status, User, UserId,
};
use crate::error::AppError;

/// Article operations
#[async_trait]
pub trait ArticleService: Send + Sync {
    async fn create_article(&self, user: &User, draft: ArticleDraft)
        -> Result<ArticleInfo, AppError>;

    async fn update_article(
        &self,
        user: &User,
        article_id: ArticleId,
        draft: ArticleDraft,
    ) -> Result<(), AppError>;

    async fn get_articles(
        &self,
        viewer: Option<&User>,
        query: ArticleQuery,
        page: PageRequest,
    ) -> Result<Page<ArticleInfo>, AppError>;

    async fn get_articles_by_user(
        &self,
        viewer: Option<&User>,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Page<ArticleInfo>, AppError>;

    async fn get_articles_liked_by_user(
        &self,
        user: &User,
        page: PageRequest,
    ) -> Result<Page<ArticleInfo>, AppError>;

    async fn get_article_detail(
        &self,
        viewer: Option<&User>,
        article_id: ArticleId,
    ) -> Result<ArticleInfo, AppError>;

    async fn delete_article(&self, user: &User, article_id: ArticleId) -> Result<(), AppError>;

    /// Toggle the caller's like on an article
    async fn like_article(&self, user: &User, article_id: ArticleId) -> Result<(), AppError>;

    async fn modify_article_status(
        &self,
        user: &User,
        article_id: ArticleId,
        status: Status,
    ) -> Result<(), AppError>;
}

/// Comment operations
#[async_trait]
pub trait CommentService: Send + Sync {
    /// Root comments with their replies nested
    async fn get_comments_by_article(
        &self,
        article_id: ArticleId,
    ) -> Result<Vec<CommentInfo>, AppError>;

    async fn get_comments_by_user(&self, user_id: UserId) -> Result<Vec<CommentInfo>, AppError>;

    async fn create_comment(
        &self,
        user: &User,
        article_id: ArticleId,
        draft: CommentDraft,
    ) -> Result<CommentInfo, AppError>;

    async fn create_reply(
        &self,
        user: &User,
        article_id: ArticleId,
        parent_id: CommentId,
        draft: CommentDraft,
    ) -> Result<CommentInfo, AppError>;

    async fn update_comment(
        &self,
        user: &User,
        article_id: ArticleId,
        comment_id: CommentId,
        draft: CommentDraft,
    ) -> Result<(), AppError>;

    async fn delete_comment(
        &self,
        user: &User,
        article_id: ArticleId,
        comment_id: CommentId,
    ) -> Result<(), AppError>;

    async fn modify_comment_status(
        &self,
        user: &User,
        comment_id: CommentId,
        status: Status,
    ) -> Result<(), AppError>;
}

/// A file received from a multipart upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Stores uploaded files and hands back a public URL
#[async_trait]
pub trait FileUploadService: Send + Sync {
    async fn upload_file(&self, file: UploadedFile, directory: &str) -> Result<String, AppError>;
}
