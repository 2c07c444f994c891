//! PostgreSQL adapter for ArticleLikeRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};

use crate::domain::entities::{ArticleId, UserId};
use crate::domain::ports::ArticleLikeRepository;
use crate::entity::article_likes;
use crate::error::DomainError;

/// PostgreSQL implementation of ArticleLikeRepository
pub struct PostgresArticleLikeRepository {
    db: DatabaseConnection,
}

impl PostgresArticleLikeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_insert_err(user_id: &UserId, article_id: &ArticleId, e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(format!(
            "User {} already likes article {}",
            user_id, article_id
        )),
        _ => DomainError::Database(e.to_string()),
    }
}

#[async_trait]
impl ArticleLikeRepository for PostgresArticleLikeRepository {
    async fn exists(&self, user_id: &UserId, article_id: &ArticleId) -> Result<bool, DomainError> {
        let result = article_likes::Entity::find_by_id((user_id.0, article_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.is_some())
    }

    async fn find_liked_among(
        &self,
        user_id: &UserId,
        article_ids: &[ArticleId],
    ) -> Result<Vec<ArticleId>, DomainError> {
        if article_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = article_likes::Entity::find()
            .filter(article_likes::Column::UserId.eq(user_id.0))
            .filter(article_likes::Column::ArticleId.is_in(article_ids.iter().map(|id| id.0)))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| ArticleId(m.article_id)).collect())
    }

    async fn add(&self, user_id: &UserId, article_id: &ArticleId) -> Result<(), DomainError> {
        article_likes::ActiveModel {
            user_id: Set(user_id.0),
            article_id: Set(article_id.0),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_insert_err(user_id, article_id, e))?;

        Ok(())
    }

    async fn remove(&self, user_id: &UserId, article_id: &ArticleId) -> Result<(), DomainError> {
        article_likes::Entity::delete_many()
            .filter(article_likes::Column::UserId.eq(user_id.0))
            .filter(article_likes::Column::ArticleId.eq(article_id.0))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete_by_article(&self, article_id: &ArticleId) -> Result<(), DomainError> {
        article_likes::Entity::delete_many()
            .filter(article_likes::Column::ArticleId.eq(article_id.0))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}
