//! Application layer
//!
//! Implementations of the service ports. Services coordinate repository
//! ports and enforce ownership and moderation rules.

pub mod article_service;
pub mod comment_service;

pub use article_service::ArticleServiceImpl;
pub use comment_service::CommentServiceImpl;
