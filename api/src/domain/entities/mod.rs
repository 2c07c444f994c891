//! Domain entities
//!
//! Pure domain models representing core forum concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod article;
pub mod comment;
pub mod page;
pub mod status;
pub mod user;

pub use article::{
    Article, ArticleDraft, ArticleId, ArticleInfo, ArticleQuery, ArticleSearch, ArticleSort,
    Position, SearchType,
};
pub use comment::{Comment, CommentDraft, CommentId, CommentInfo, NewComment};
pub use page::{Page, PageRequest};
pub use status::Status;
pub use user::{User, UserId, UserRole};
