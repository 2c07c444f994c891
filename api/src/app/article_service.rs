//! Article service
//!
//! Article CRUD, listings, view counting, likes and moderation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::{
    Article, ArticleDraft, ArticleId, ArticleInfo, ArticleQuery, ArticleSearch, Page, PageRequest,
    Status, User, UserId,
};
use crate::domain::ports::{
    ArticleLikeRepository, ArticleRepository, ArticleService, CommentRepository, UserRepository,
};
use crate::error::AppError;

/// Service for managing articles
pub struct ArticleServiceImpl<AR, LR, CR, UR>
where
    AR: ArticleRepository,
    LR: ArticleLikeRepository,
    CR: CommentRepository,
    UR: UserRepository,
{
    articles: Arc<AR>,
    likes: Arc<LR>,
    comments: Arc<CR>,
    users: Arc<UR>,
}

impl<AR, LR, CR, UR> ArticleServiceImpl<AR, LR, CR, UR>
where
    AR: ArticleRepository,
    LR: ArticleLikeRepository,
    CR: CommentRepository,
    UR: UserRepository,
{
    pub fn new(articles: Arc<AR>, likes: Arc<LR>, comments: Arc<CR>, users: Arc<UR>) -> Self {
        Self {
            articles,
            likes,
            comments,
            users,
        }
    }

    async fn find_article(&self, id: ArticleId) -> Result<Article, AppError> {
        self.articles
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Article {} not found", id)))
    }

    /// Attach author info and the viewer's like flag to a batch of articles
    async fn to_infos(
        &self,
        articles: Vec<Article>,
        viewer: Option<&User>,
    ) -> Result<Vec<ArticleInfo>, AppError> {
        if articles.is_empty() {
            return Ok(Vec::new());
        }

        let mut author_ids: Vec<UserId> = articles.iter().map(|a| a.user_id).collect();
        author_ids.sort();
        author_ids.dedup();

        let authors: HashMap<UserId, User> = self
            .users
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let liked: HashSet<ArticleId> = match viewer {
            Some(viewer) => {
                let ids: Vec<ArticleId> = articles.iter().map(|a| a.id).collect();
                self.likes
                    .find_liked_among(&viewer.id, &ids)
                    .await?
                    .into_iter()
                    .collect()
            }
            None => HashSet::new(),
        };

        Ok(articles
            .into_iter()
            .map(|article| {
                let is_liked = liked.contains(&article.id);
                let author = authors.get(&article.user_id);
                ArticleInfo::new(article, author, is_liked)
            })
            .collect())
    }

    async fn to_page(
        &self,
        (articles, total): (Vec<Article>, u64),
        page: PageRequest,
        viewer: Option<&User>,
    ) -> Result<Page<ArticleInfo>, AppError> {
        let content = self.to_infos(articles, viewer).await?;
        Ok(Page::new(content, page, total))
    }
}

#[async_trait]
impl<AR, LR, CR, UR> ArticleService for ArticleServiceImpl<AR, LR, CR, UR>
where
    AR: ArticleRepository,
    LR: ArticleLikeRepository,
    CR: CommentRepository,
    UR: UserRepository,
{
    async fn create_article(
        &self,
        user: &User,
        draft: ArticleDraft,
    ) -> Result<ArticleInfo, AppError> {
        let article = self.articles.create(&user.id, &draft).await?;

        tracing::info!(article_id = %article.id, user_id = %user.id, "Article created");

        Ok(ArticleInfo::new(article, Some(user), false))
    }

    async fn update_article(
        &self,
        user: &User,
        article_id: ArticleId,
        draft: ArticleDraft,
    ) -> Result<(), AppError> {
        let article = self.find_article(article_id).await?;

        if !article.is_written_by(user) {
            return Err(AppError::Forbidden(
                "Only the author can edit this article".to_string(),
            ));
        }

        self.articles.update(&article_id, &draft).await?;

        tracing::info!(article_id = %article_id, user_id = %user.id, "Article updated");
        Ok(())
    }

    async fn get_articles(
        &self,
        viewer: Option<&User>,
        query: ArticleQuery,
        page: PageRequest,
    ) -> Result<Page<ArticleInfo>, AppError> {
        let search = ArticleSearch::from(&query);
        let found = self.articles.search(&search, page).await?;
        self.to_page(found, page, viewer).await
    }

    async fn get_articles_by_user(
        &self,
        viewer: Option<&User>,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Page<ArticleInfo>, AppError> {
        let include_hidden = viewer.is_some_and(|v| v.id == user_id || v.is_admin());
        let found = self
            .articles
            .find_by_user(&user_id, include_hidden, page)
            .await?;
        self.to_page(found, page, viewer).await
    }

    async fn get_articles_liked_by_user(
        &self,
        user: &User,
        page: PageRequest,
    ) -> Result<Page<ArticleInfo>, AppError> {
        let found = self.articles.find_liked_by_user(&user.id, page).await?;
        self.to_page(found, page, Some(user)).await
    }

    async fn get_article_detail(
        &self,
        viewer: Option<&User>,
        article_id: ArticleId,
    ) -> Result<ArticleInfo, AppError> {
        let mut article = self.find_article(article_id).await?;

        if !article.is_visible_to(viewer) {
            return Err(AppError::NotFound(format!(
                "Article {} not found",
                article_id
            )));
        }

        article.view_count = self.articles.increment_view_count(&article_id).await?;

        let is_liked = match viewer {
            Some(viewer) => self.likes.exists(&viewer.id, &article_id).await?,
            None => false,
        };
        let author = self.users.find_by_id(&article.user_id).await?;

        Ok(ArticleInfo::new(article, author.as_ref(), is_liked))
    }

    async fn delete_article(&self, user: &User, article_id: ArticleId) -> Result<(), AppError> {
        let article = self.find_article(article_id).await?;

        if !article.is_written_by(user) && !user.is_admin() {
            return Err(AppError::Forbidden(
                "Only the author can delete this article".to_string(),
            ));
        }

        self.comments.delete_by_article(&article_id).await?;
        self.likes.delete_by_article(&article_id).await?;
        self.articles.delete(&article_id).await?;

        tracing::info!(article_id = %article_id, user_id = %user.id, "Article deleted");
        Ok(())
    }

    async fn like_article(&self, user: &User, article_id: ArticleId) -> Result<(), AppError> {
        let article = self.find_article(article_id).await?;

        if article.status != Status::Visible {
            return Err(AppError::NotFound(format!(
                "Article {} not found",
                article_id
            )));
        }

        if self.likes.exists(&user.id, &article_id).await? {
            self.likes.remove(&user.id, &article_id).await?;
            self.articles.adjust_like_count(&article_id, -1).await?;
            tracing::debug!(article_id = %article_id, user_id = %user.id, "Like removed");
        } else {
            self.likes.add(&user.id, &article_id).await?;
            self.articles.adjust_like_count(&article_id, 1).await?;
            tracing::debug!(article_id = %article_id, user_id = %user.id, "Like added");
        }

        Ok(())
    }

    async fn modify_article_status(
        &self,
        user: &User,
        article_id: ArticleId,
        status: Status,
    ) -> Result<(), AppError> {
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins can change article status".to_string(),
            ));
        }

        self.find_article(article_id).await?;
        self.articles.update_status(&article_id, status).await?;

        tracing::info!(article_id = %article_id, status = %status, "Article status changed");
        Ok(())
    }
}
