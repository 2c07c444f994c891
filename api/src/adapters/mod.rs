//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;
pub mod storage;

pub use postgres::{
    create_missing_tables, PostgresArticleLikeRepository, PostgresArticleRepository,
    PostgresCommentRepository, PostgresUserRepository,
};
pub use storage::LocalFileUploadService;
