//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    Article, ArticleDraft, ArticleId, ArticleSearch, Comment, CommentId, NewComment, PageRequest,
    Status, User, UserId,
};
use crate::error::DomainError;

/// Read access to users (users are provisioned elsewhere)
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find several users at once; missing ids are skipped
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError>;

    /// Find a user by the SHA-256 hex digest of their API key
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError>;
}

/// Repository for Article entities
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Find an article by ID
    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, DomainError>;

    /// Create a visible article with zeroed counters
    async fn create(&self, user_id: &UserId, draft: &ArticleDraft)
        -> Result<Article, DomainError>;

    /// Replace the editable fields and bump `updated_at`
    async fn update(&self, id: &ArticleId, draft: &ArticleDraft) -> Result<(), DomainError>;

    /// Delete an article row
    async fn delete(&self, id: &ArticleId) -> Result<(), DomainError>;

    /// Visible articles matching the search, sorted and paged.
    /// Returns the page plus the total match count.
    async fn search(
        &self,
        search: &ArticleSearch,
        page: PageRequest,
    ) -> Result<(Vec<Article>, u64), DomainError>;

    /// A user's articles, newest first
    async fn find_by_user(
        &self,
        user_id: &UserId,
        include_hidden: bool,
        page: PageRequest,
    ) -> Result<(Vec<Article>, u64), DomainError>;

    /// Visible articles liked by a user, most recently liked first
    async fn find_liked_by_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<(Vec<Article>, u64), DomainError>;

    /// Increment the view counter, returning the new value
    async fn increment_view_count(&self, id: &ArticleId) -> Result<i64, DomainError>;

    /// Add `delta` to the like counter
    async fn adjust_like_count(&self, id: &ArticleId, delta: i64) -> Result<(), DomainError>;

    /// Add `delta` to the comment counter
    async fn adjust_comment_count(&self, id: &ArticleId, delta: i64) -> Result<(), DomainError>;

    /// Set the moderation status
    async fn update_status(&self, id: &ArticleId, status: Status) -> Result<(), DomainError>;
}

/// Repository for article likes (one row per user and article)
#[async_trait]
pub trait ArticleLikeRepository: Send + Sync {
    /// Check whether a user likes an article
    async fn exists(&self, user_id: &UserId, article_id: &ArticleId) -> Result<bool, DomainError>;

    /// Of the given articles, those the user likes
    async fn find_liked_among(
        &self,
        user_id: &UserId,
        article_ids: &[ArticleId],
    ) -> Result<Vec<ArticleId>, DomainError>;

    /// Record a like
    async fn add(&self, user_id: &UserId, article_id: &ArticleId) -> Result<(), DomainError>;

    /// Remove a like
    async fn remove(&self, user_id: &UserId, article_id: &ArticleId) -> Result<(), DomainError>;

    /// Remove every like on an article
    async fn delete_by_article(&self, article_id: &ArticleId) -> Result<(), DomainError>;
}

/// Repository for Comment entities
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find a comment by ID (including soft-deleted ones)
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, DomainError>;

    /// All comments on an article, oldest first
    async fn find_by_article(&self, article_id: &ArticleId) -> Result<Vec<Comment>, DomainError>;

    /// All comments written by a user, newest first
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Comment>, DomainError>;

    /// Create a new comment
    async fn create(&self, comment: &NewComment) -> Result<Comment, DomainError>;

    /// Replace the content and bump `updated_at`
    async fn update_content(&self, id: &CommentId, content: &str) -> Result<(), DomainError>;

    /// Mark a comment as deleted
    async fn soft_delete(&self, id: &CommentId) -> Result<(), DomainError>;

    /// Set the moderation status
    async fn update_status(&self, id: &CommentId, status: Status) -> Result<(), DomainError>;

    /// Remove every comment on an article
    async fn delete_by_article(&self, article_id: &ArticleId) -> Result<(), DomainError>;
}
