//! PostgreSQL adapter for CommentRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::entities::{ArticleId, Comment, CommentId, NewComment, Status, UserId};
use crate::domain::ports::CommentRepository;
use crate::entity::comments;
use crate::error::DomainError;

/// PostgreSQL implementation of CommentRepository
pub struct PostgresCommentRepository {
    db: DatabaseConnection,
}

impl PostgresCommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn apply(&self, id: &CommentId, model: comments::ActiveModel) -> Result<(), DomainError> {
        model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => {
                DomainError::NotFound(format!("Comment {} not found", id))
            }
            other => DomainError::Database(other.to_string()),
        })?;

        Ok(())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, DomainError> {
        let result = comments::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_article(&self, article_id: &ArticleId) -> Result<Vec<Comment>, DomainError> {
        let results = comments::Entity::find()
            .filter(comments::Column::ArticleId.eq(article_id.0))
            .order_by_asc(comments::Column::CreatedAt)
            .order_by_asc(comments::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Comment>, DomainError> {
        let results = comments::Entity::find()
            .filter(comments::Column::UserId.eq(user_id.0))
            .order_by_desc(comments::Column::CreatedAt)
            .order_by_desc(comments::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, comment: &NewComment) -> Result<Comment, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = comments::ActiveModel {
            article_id: Set(comment.article_id.0),
            parent_id: Set(comment.parent_id.map(|p| p.0)),
            user_id: Set(comment.user_id.0),
            content: Set(comment.content.clone()),
            status: Set(Status::Visible.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update_content(&self, id: &CommentId, content: &str) -> Result<(), DomainError> {
        self.apply(
            id,
            comments::ActiveModel {
                id: Set(id.0),
                content: Set(content.to_string()),
                updated_at: Set(Utc::now().fixed_offset()),
                ..Default::default()
            },
        )
        .await
    }

    async fn soft_delete(&self, id: &CommentId) -> Result<(), DomainError> {
        self.apply(
            id,
            comments::ActiveModel {
                id: Set(id.0),
                deleted_at: Set(Some(Utc::now().fixed_offset())),
                ..Default::default()
            },
        )
        .await
    }

    async fn update_status(&self, id: &CommentId, status: Status) -> Result<(), DomainError> {
        self.apply(
            id,
            comments::ActiveModel {
                id: Set(id.0),
                status: Set(status.to_string()),
                ..Default::default()
            },
        )
        .await
    }

    async fn delete_by_article(&self, article_id: &ArticleId) -> Result<(), DomainError> {
        comments::Entity::delete_many()
            .filter(comments::Column::ArticleId.eq(article_id.0))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

impl From<comments::Model> for Comment {
    fn from(model: comments::Model) -> Self {
        Comment {
            id: CommentId(model.id),
            article_id: ArticleId(model.article_id),
            parent_id: model.parent_id.map(CommentId),
            user_id: UserId(model.user_id),
            content: model.content,
            status: model.status.parse().unwrap_or(Status::Invisible),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            deleted_at: model.deleted_at.map(|dt| dt.with_timezone(&Utc)),
        }
    }
}
