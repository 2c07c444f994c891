//! Article domain entity
//!
//! A forum post. Articles belong to a category (`Position`), optionally name
//! the document they discuss, and carry view/like/comment counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::status::Status;
use super::user::{User, UserId};

/// Unique identifier for an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArticleId(pub i64);

impl From<i64> for ArticleId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Article category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    Frontend,
    Backend,
    Database,
    Devops,
    Mobile,
    Ai,
    Security,
    Etc,
}

impl Position {
    pub const ALL: [Position; 8] = [
        Position::Frontend,
        Position::Backend,
        Position::Database,
        Position::Devops,
        Position::Mobile,
        Position::Ai,
        Position::Security,
        Position::Etc,
    ];
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Frontend => write!(f, "FRONTEND"),
            Position::Backend => write!(f, "BACKEND"),
            Position::Database => write!(f, "DATABASE"),
            Position::Devops => write!(f, "DEVOPS"),
            Position::Mobile => write!(f, "MOBILE"),
            Position::Ai => write!(f, "AI"),
            Position::Security => write!(f, "SECURITY"),
            Position::Etc => write!(f, "ETC"),
        }
    }
}

impl std::str::FromStr for Position {
    type Err = String;

    /// Matches the whole input against the category names after upper-casing
    /// it. Surrounding whitespace is not trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Position::ALL
            .into_iter()
            .find(|p| p.to_string() == upper)
            .ok_or_else(|| format!("Unknown position: {}", s))
    }
}

/// A forum article
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub id: ArticleId,
    pub user_id: UserId,
    pub title: String,
    pub category: Position,
    pub document_name: Option<String>,
    pub content: String,
    pub status: Status,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn is_written_by(&self, user: &User) -> bool {
        self.user_id == user.id
    }

    /// Hidden articles stay readable for their author and for admins.
    pub fn is_visible_to(&self, viewer: Option<&User>) -> bool {
        match self.status {
            Status::Visible => true,
            Status::Invisible => viewer.is_some_and(|u| u.is_admin() || self.is_written_by(u)),
        }
    }
}

/// Article payload for create and update requests
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    #[validate(length(min = 1, max = 100, message = "title must be 1 to 100 characters"))]
    pub title: String,
    pub category: Position,
    #[validate(length(max = 100, message = "documentName must be at most 100 characters"))]
    #[serde(default)]
    pub document_name: Option<String>,
    #[validate(length(min = 1, max = 20000, message = "content must be 1 to 20000 characters"))]
    pub content: String,
}

/// Raw list parameters as received from the HTTP surface, after the filter
/// string has been split into its structured and free-text parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub sort: String,
    pub position: Option<Position>,
    pub filter: String,
    pub keyword: String,
    pub search_type: String,
}

/// Sort order for article listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleSort {
    #[default]
    Latest,
    Oldest,
    Views,
    Likes,
    Comments,
}

impl ArticleSort {
    /// Unknown sort keys fall back to `Latest`.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "oldest" => ArticleSort::Oldest,
            "views" | "view" => ArticleSort::Views,
            "likes" | "like" => ArticleSort::Likes,
            "comments" | "comment" => ArticleSort::Comments,
            _ => ArticleSort::Latest,
        }
    }
}

/// Which article field a keyword is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    Title,
    Content,
    User,
    #[default]
    TitleOrContent,
}

impl SearchType {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "title" => SearchType::Title,
            "content" => SearchType::Content,
            "user" | "nickname" | "author" => SearchType::User,
            _ => SearchType::TitleOrContent,
        }
    }
}

/// Normalized search criteria handed to the article repository
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleSearch {
    pub sort: ArticleSort,
    pub position: Option<Position>,
    pub document_name: Option<String>,
    pub keyword: Option<String>,
    pub search_type: SearchType,
}

impl From<&ArticleQuery> for ArticleSearch {
    fn from(query: &ArticleQuery) -> Self {
        let non_empty = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        Self {
            sort: ArticleSort::parse(&query.sort),
            position: query.position,
            document_name: non_empty(&query.filter),
            keyword: non_empty(&query.keyword),
            search_type: SearchType::parse(&query.search_type),
        }
    }
}

/// Article as returned to clients (detail and list entries)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInfo {
    pub article_id: i64,
    pub user_id: i64,
    pub nickname: String,
    pub profile_image: Option<String>,
    pub title: String,
    pub category: Position,
    pub document_name: Option<String>,
    pub content: String,
    pub status: Status,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Placeholder nickname for authors that no longer exist
pub const UNKNOWN_AUTHOR: &str = "(unknown)";

impl ArticleInfo {
    pub fn new(article: Article, author: Option<&User>, is_liked: bool) -> Self {
        Self {
            article_id: article.id.0,
            user_id: article.user_id.0,
            nickname: author
                .map(|u| u.nickname.clone())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            profile_image: author.and_then(|u| u.profile_image.clone()),
            title: article.title,
            category: article.category,
            document_name: article.document_name,
            content: article.content,
            status: article.status,
            view_count: article.view_count,
            like_count: article.like_count,
            comment_count: article.comment_count,
            is_liked,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}
