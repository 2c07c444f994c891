//! Comment domain entity
//!
//! Comments attach to an article. A comment with a parent is a reply; replies
//! cannot themselves be replied to. Deletion is soft so that replies keep
//! their thread.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::article::{ArticleId, UNKNOWN_AUTHOR};
use super::status::Status;
use super::user::{User, UserId};

/// Unique identifier for a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommentId(pub i64);

impl From<i64> for CommentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A comment or reply on an article
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub article_id: ArticleId,
    pub parent_id: Option<CommentId>,
    pub user_id: UserId,
    pub content: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_written_by(&self, user: &User) -> bool {
        self.user_id == user.id
    }

    /// Whether the comment text may be shown to readers
    pub fn is_readable(&self) -> bool {
        !self.is_deleted() && self.status == Status::Visible
    }
}

/// Data needed to create a new comment
#[derive(Debug, Clone)]
pub struct NewComment {
    pub article_id: ArticleId,
    pub parent_id: Option<CommentId>,
    pub user_id: UserId,
    pub content: String,
}

/// Comment payload for create, reply and update requests
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentDraft {
    #[validate(length(min = 1, max = 1000, message = "content must be 1 to 1000 characters"))]
    pub content: String,
}

/// Comment as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInfo {
    pub comment_id: i64,
    pub article_id: i64,
    pub parent_id: Option<i64>,
    pub user_id: i64,
    pub nickname: String,
    pub profile_image: Option<String>,
    pub content: String,
    pub status: Status,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub replies: Vec<CommentInfo>,
}

impl CommentInfo {
    /// Unreadable comments keep their place in a thread with blank content.
    pub fn new(comment: Comment, author: Option<&User>) -> Self {
        let content = if comment.is_readable() {
            comment.content
        } else {
            String::new()
        };

        Self {
            comment_id: comment.id.0,
            article_id: comment.article_id.0,
            parent_id: comment.parent_id.map(|p| p.0),
            user_id: comment.user_id.0,
            nickname: author
                .map(|u| u.nickname.clone())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            profile_image: author.and_then(|u| u.profile_image.clone()),
            content,
            status: comment.status,
            is_deleted: comment.deleted_at.is_some(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            replies: Vec::new(),
        }
    }
}
