//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod repositories;
pub mod services;

pub use repositories::{
    ArticleLikeRepository, ArticleRepository, CommentRepository, UserRepository,
};
pub use services::{ArticleService, CommentService, FileUploadService, UploadedFile};
