//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod article_repo;
pub mod comment_repo;
pub mod like_repo;
pub mod schema;
pub mod user_repo;


pub use article_repo::PostgresArticleRepository;
pub use comment_repo::PostgresCommentRepository;
pub use like_repo::PostgresArticleLikeRepository;
pub use schema::create_missing_tables;
pub use user_repo::PostgresUserRepository;
