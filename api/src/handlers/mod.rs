//! HTTP handlers
//!
//! Axum request handlers for the forum endpoints.

pub mod articles;
pub mod comments;
pub mod extract;
pub mod moderation;
pub mod uploads;

pub use articles::{
    create_article, delete_article, get_article, get_articles, get_articles_by_user,
    get_liked_articles, like_article, update_article,
};
pub use comments::{
    create_comment, create_reply, delete_comment, get_comments_by_article, get_comments_by_user,
    update_comment,
};
pub use moderation::{modify_article_status, modify_comment_status};
pub use uploads::upload_image;
