//! Comment service
//!
//! Comments, one level of replies, soft deletion and moderation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::{
    Article, ArticleId, Comment, CommentDraft, CommentId, CommentInfo, NewComment, Status, User,
    UserId,
};
use crate::domain::ports::{ArticleRepository, CommentRepository, CommentService, UserRepository};
use crate::error::AppError;

/// Service for managing comments
pub struct CommentServiceImpl<CR, AR, UR>
where
    CR: CommentRepository,
    AR: ArticleRepository,
    UR: UserRepository,
{
    comments: Arc<CR>,
    articles: Arc<AR>,
    users: Arc<UR>,
}

impl<CR, AR, UR> CommentServiceImpl<CR, AR, UR>
where
    CR: CommentRepository,
    AR: ArticleRepository,
    UR: UserRepository,
{
    pub fn new(comments: Arc<CR>, articles: Arc<AR>, users: Arc<UR>) -> Self {
        Self {
            comments,
            articles,
            users,
        }
    }

    /// Load an article that accepts new comments
    async fn open_article(&self, article_id: ArticleId) -> Result<Article, AppError> {
        match self.articles.find_by_id(&article_id).await? {
            Some(article) if article.status == Status::Visible => Ok(article),
            _ => Err(AppError::NotFound(format!(
                "Article {} not found",
                article_id
            ))),
        }
    }

    /// Load a live comment and check it belongs to the article in the path
    async fn live_comment_on(
        &self,
        article_id: ArticleId,
        comment_id: CommentId,
    ) -> Result<Comment, AppError> {
        match self.comments.find_by_id(&comment_id).await? {
            Some(c) if c.article_id == article_id && !c.is_deleted() => Ok(c),
            _ => Err(AppError::NotFound(format!(
                "Comment {} not found on article {}",
                comment_id, article_id
            ))),
        }
    }

    async fn authors_of(&self, comments: &[Comment]) -> Result<HashMap<UserId, User>, AppError> {
        let mut ids: Vec<UserId> = comments.iter().map(|c| c.user_id).collect();
        ids.sort();
        ids.dedup();

        Ok(self
            .users
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect())
    }

    async fn insert(&self, user: &User, new_comment: NewComment) -> Result<CommentInfo, AppError> {
        let comment = self.comments.create(&new_comment).await?;
        self.articles
            .adjust_comment_count(&new_comment.article_id, 1)
            .await?;

        tracing::info!(
            comment_id = %comment.id,
            article_id = %comment.article_id,
            user_id = %user.id,
            reply = comment.is_reply(),
            "Comment created"
        );

        Ok(CommentInfo::new(comment, Some(user)))
    }
}

/// Nest replies under their root comments.
///
/// Deleted replies are dropped; a deleted root survives (blanked) only while
/// it still has replies.
pub fn build_thread(comments: Vec<Comment>, authors: &HashMap<UserId, User>) -> Vec<CommentInfo> {
    let mut roots = Vec::new();
    let mut replies: HashMap<CommentId, Vec<Comment>> = HashMap::new();

    for comment in comments {
        match comment.parent_id {
            Some(parent) if !comment.is_deleted() => replies.entry(parent).or_default().push(comment),
            Some(_) => {}
            None => roots.push(comment),
        }
    }

    let mut thread = Vec::with_capacity(roots.len());
    for root in roots {
        let children = replies.remove(&root.id).unwrap_or_default();
        if root.is_deleted() && children.is_empty() {
            continue;
        }

        let author = authors.get(&root.user_id);
        let mut info = CommentInfo::new(root, author);
        info.replies = children
            .into_iter()
            .map(|reply| {
                let author = authors.get(&reply.user_id);
                CommentInfo::new(reply, author)
            })
            .collect();
        thread.push(info);
    }

    thread
}

#[async_trait]
impl<CR, AR, UR> CommentService for CommentServiceImpl<CR, AR, UR>
where
    CR: CommentRepository,
    AR: ArticleRepository,
    UR: UserRepository,
{
    async fn get_comments_by_article(
        &self,
        article_id: ArticleId,
    ) -> Result<Vec<CommentInfo>, AppError> {
        if self.articles.find_by_id(&article_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Article {} not found",
                article_id
            )));
        }

        let comments = self.comments.find_by_article(&article_id).await?;
        let authors = self.authors_of(&comments).await?;

        Ok(build_thread(comments, &authors))
    }

    async fn get_comments_by_user(&self, user_id: UserId) -> Result<Vec<CommentInfo>, AppError> {
        let author = self.users.find_by_id(&user_id).await?;
        let comments = self.comments.find_by_user(&user_id).await?;

        Ok(comments
            .into_iter()
            .filter(Comment::is_readable)
            .map(|c| CommentInfo::new(c, author.as_ref()))
            .collect())
    }

    async fn create_comment(
        &self,
        user: &User,
        article_id: ArticleId,
        draft: CommentDraft,
    ) -> Result<CommentInfo, AppError> {
        self.open_article(article_id).await?;

        self.insert(
            user,
            NewComment {
                article_id,
                parent_id: None,
                user_id: user.id,
                content: draft.content,
            },
        )
        .await
    }

    async fn create_reply(
        &self,
        user: &User,
        article_id: ArticleId,
        parent_id: CommentId,
        draft: CommentDraft,
    ) -> Result<CommentInfo, AppError> {
        self.open_article(article_id).await?;
        let parent = self.live_comment_on(article_id, parent_id).await?;

        if parent.is_reply() {
            return Err(AppError::BadRequest(
                "Replies cannot be replied to".to_string(),
            ));
        }

        self.insert(
            user,
            NewComment {
                article_id,
                parent_id: Some(parent_id),
                user_id: user.id,
                content: draft.content,
            },
        )
        .await
    }

    async fn update_comment(
        &self,
        user: &User,
        article_id: ArticleId,
        comment_id: CommentId,
        draft: CommentDraft,
    ) -> Result<(), AppError> {
        let comment = self.live_comment_on(article_id, comment_id).await?;

        if !comment.is_written_by(user) {
            return Err(AppError::Forbidden(
                "Only the author can edit this comment".to_string(),
            ));
        }

        self.comments
            .update_content(&comment_id, &draft.content)
            .await?;

        tracing::info!(comment_id = %comment_id, user_id = %user.id, "Comment updated");
        Ok(())
    }

    async fn delete_comment(
        &self,
        user: &User,
        article_id: ArticleId,
        comment_id: CommentId,
    ) -> Result<(), AppError> {
        let comment = self.live_comment_on(article_id, comment_id).await?;

        if !comment.is_written_by(user) && !user.is_admin() {
            return Err(AppError::Forbidden(
                "Only the author can delete this comment".to_string(),
            ));
        }

        self.comments.soft_delete(&comment_id).await?;
        self.articles.adjust_comment_count(&article_id, -1).await?;

        tracing::info!(comment_id = %comment_id, user_id = %user.id, "Comment deleted");
        Ok(())
    }

    async fn modify_comment_status(
        &self,
        user: &User,
        comment_id: CommentId,
        status: Status,
    ) -> Result<(), AppError> {
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins can change comment status".to_string(),
            ));
        }

        if self.comments.find_by_id(&comment_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Comment {} not found",
                comment_id
            )));
        }
        self.comments.update_status(&comment_id, status).await?;

        tracing::info!(comment_id = %comment_id, status = %status, "Comment status changed");
        Ok(())
    }
}
