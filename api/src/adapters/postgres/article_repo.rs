//! PostgreSQL adapter for ArticleRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use crate::domain::entities::{
    Article, ArticleDraft, ArticleId, ArticleSearch, ArticleSort, PageRequest, Position,
    SearchType, Status, UserId,
};
use crate::domain::ports::ArticleRepository;
use crate::entity::{article_likes, articles, users};
use crate::error::DomainError;

/// PostgreSQL implementation of ArticleRepository
pub struct PostgresArticleRepository {
    db: DatabaseConnection,
}

impl PostgresArticleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Count all rows of `query`, then fetch the requested page of it
    async fn fetch_page(
        &self,
        query: Select<articles::Entity>,
        page: PageRequest,
    ) -> Result<(Vec<Article>, u64), DomainError> {
        let total = query
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let results = query
            .offset(page.offset())
            .limit(page.size)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok((results.into_iter().map(|m| m.into()).collect(), total))
    }

    async fn add_to_counter(
        &self,
        id: &ArticleId,
        column: articles::Column,
        delta: i64,
    ) -> Result<(), DomainError> {
        let result = articles::Entity::update_many()
            .col_expr(column, Expr::col(column).add(delta))
            .filter(articles::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: &ArticleId) -> DomainError {
    DomainError::NotFound(format!("Article {} not found", id))
}

fn map_update_err(id: &ArticleId, e: DbErr) -> DomainError {
    match e {
        DbErr::RecordNotUpdated => not_found(id),
        other => DomainError::Database(other.to_string()),
    }
}

/// Newest first; ties break by id so paging is stable
fn order_latest(query: Select<articles::Entity>) -> Select<articles::Entity> {
    query
        .order_by_desc(articles::Column::CreatedAt)
        .order_by_desc(articles::Column::Id)
}

fn apply_sort(query: Select<articles::Entity>, sort: ArticleSort) -> Select<articles::Entity> {
    match sort {
        ArticleSort::Latest => order_latest(query),
        ArticleSort::Oldest => query
            .order_by_asc(articles::Column::CreatedAt)
            .order_by_asc(articles::Column::Id),
        ArticleSort::Views => order_latest(query.order_by_desc(articles::Column::ViewCount)),
        ArticleSort::Likes => order_latest(query.order_by_desc(articles::Column::LikeCount)),
        ArticleSort::Comments => {
            order_latest(query.order_by_desc(articles::Column::CommentCount))
        }
    }
}

/// Escape `LIKE` metacharacters so user input only matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Substring match on the literal text of `keyword`
fn containing(keyword: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(keyword))).escape('\\')
}

fn search_condition(search: &ArticleSearch) -> Condition {
    let mut condition =
        Condition::all().add(articles::Column::Status.eq(Status::Visible.to_string()));

    if let Some(position) = search.position {
        condition = condition.add(articles::Column::Category.eq(position.to_string()));
    }

    if let Some(doc) = &search.document_name {
        condition = condition.add(
            Expr::expr(Func::lower(Expr::col(articles::Column::DocumentName)))
                .eq(doc.to_lowercase()),
        );
    }

    if let Some(keyword) = &search.keyword {
        let keyword = keyword.as_str();
        condition = condition.add(match search.search_type {
            SearchType::Title => Condition::all().add(articles::Column::Title.like(containing(keyword))),
            SearchType::Content => {
                Condition::all().add(articles::Column::Content.like(containing(keyword)))
            }
            SearchType::User => Condition::all().add(
                articles::Column::UserId.in_subquery(
                    Query::select()
                        .column(users::Column::Id)
                        .from(users::Entity)
                        .and_where(users::Column::Nickname.like(containing(keyword)))
                        .to_owned(),
                ),
            ),
            SearchType::TitleOrContent => Condition::any()
                .add(articles::Column::Title.like(containing(keyword)))
                .add(articles::Column::Content.like(containing(keyword))),
        });
    }

    condition
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, DomainError> {
        let result = articles::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(
        &self,
        user_id: &UserId,
        draft: &ArticleDraft,
    ) -> Result<Article, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = articles::ActiveModel {
            user_id: Set(user_id.0),
            title: Set(draft.title.clone()),
            category: Set(draft.category.to_string()),
            document_name: Set(draft.document_name.clone()),
            content: Set(draft.content.clone()),
            status: Set(Status::Visible.to_string()),
            view_count: Set(0),
            like_count: Set(0),
            comment_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(&self, id: &ArticleId, draft: &ArticleDraft) -> Result<(), DomainError> {
        articles::ActiveModel {
            id: Set(id.0),
            title: Set(draft.title.clone()),
            category: Set(draft.category.to_string()),
            document_name: Set(draft.document_name.clone()),
            content: Set(draft.content.clone()),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| map_update_err(id, e))?;

        Ok(())
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), DomainError> {
        let result = articles::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn search(
        &self,
        search: &ArticleSearch,
        page: PageRequest,
    ) -> Result<(Vec<Article>, u64), DomainError> {
        let query = articles::Entity::find().filter(search_condition(search));
        self.fetch_page(apply_sort(query, search.sort), page).await
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
        include_hidden: bool,
        page: PageRequest,
    ) -> Result<(Vec<Article>, u64), DomainError> {
        let mut query = articles::Entity::find().filter(articles::Column::UserId.eq(user_id.0));
        if !include_hidden {
            query = query.filter(articles::Column::Status.eq(Status::Visible.to_string()));
        }

        self.fetch_page(order_latest(query), page).await
    }

    async fn find_liked_by_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<(Vec<Article>, u64), DomainError> {
        let likes = article_likes::Entity::find()
            .filter(article_likes::Column::UserId.eq(user_id.0))
            .filter(
                article_likes::Column::ArticleId.in_subquery(
                    Query::select()
                        .column(articles::Column::Id)
                        .from(articles::Entity)
                        .and_where(articles::Column::Status.eq(Status::Visible.to_string()))
                        .to_owned(),
                ),
            );

        let total = likes
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let liked_ids: Vec<i64> = likes
            .order_by_desc(article_likes::Column::CreatedAt)
            .order_by_desc(article_likes::Column::ArticleId)
            .offset(page.offset())
            .limit(page.size)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .into_iter()
            .map(|like| like.article_id)
            .collect();

        if liked_ids.is_empty() {
            return Ok((Vec::new(), total));
        }

        let mut by_id: HashMap<i64, articles::Model> = articles::Entity::find()
            .filter(articles::Column::Id.is_in(liked_ids.clone()))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        // Keep the like order
        let articles = liked_ids
            .into_iter()
            .filter_map(|id| by_id.remove(&id))
            .map(|m| m.into())
            .collect();

        Ok((articles, total))
    }

    async fn increment_view_count(&self, id: &ArticleId) -> Result<i64, DomainError> {
        self.add_to_counter(id, articles::Column::ViewCount, 1)
            .await?;

        let article = self.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
        Ok(article.view_count)
    }

    async fn adjust_like_count(&self, id: &ArticleId, delta: i64) -> Result<(), DomainError> {
        self.add_to_counter(id, articles::Column::LikeCount, delta)
            .await
    }

    async fn adjust_comment_count(&self, id: &ArticleId, delta: i64) -> Result<(), DomainError> {
        self.add_to_counter(id, articles::Column::CommentCount, delta)
            .await
    }

    async fn update_status(&self, id: &ArticleId, status: Status) -> Result<(), DomainError> {
        articles::ActiveModel {
            id: Set(id.0),
            status: Set(status.to_string()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| map_update_err(id, e))?;

        Ok(())
    }
}

impl From<articles::Model> for Article {
    fn from(model: articles::Model) -> Self {
        Article {
            id: ArticleId(model.id),
            user_id: UserId(model.user_id),
            title: model.title,
            category: model.category.parse().unwrap_or(Position::Etc),
            document_name: model.document_name,
            content: model.content,
            // An unreadable status must not publish the article
            status: model.status.parse().unwrap_or(Status::Invisible),
            view_count: model.view_count,
            like_count: model.like_count,
            comment_count: model.comment_count,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
