//! SeaORM entity definitions
//!
//! One module per table. Enum-valued columns (`role`, `status`, `category`)
//! are stored as their upper-case names.

pub mod article_likes;
pub mod articles;
pub mod comments;
pub mod users;
