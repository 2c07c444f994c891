//! Mock implementations of port traits
//!
//! `InMemoryForum` backs every repository port with one shared set of tables,
//! so a service built from its handles sees the same data the test inspects.
//! `RecordingForum` stands in for the service ports in HTTP tests and records
//! exactly what the handlers passed through.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, RwLock};

use crate::domain::entities::{
    Article, ArticleDraft, ArticleId, ArticleInfo, ArticleQuery, ArticleSearch, ArticleSort,
    Comment, CommentDraft, CommentId, CommentInfo, NewComment, Page, PageRequest, SearchType,
    Status, User, UserId,
};
use crate::domain::ports::{
    ArticleLikeRepository, ArticleRepository, ArticleService, CommentRepository, CommentService,
    FileUploadService, UploadedFile, UserRepository,
};
use crate::error::{AppError, DomainError};

use super::fixtures::{test_article, test_comment};

// ============================================================================
// In-Memory Forum
// ============================================================================

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    articles: BTreeMap<ArticleId, Article>,
    comments: BTreeMap<CommentId, Comment>,
    /// Insertion order doubles as like time
    likes: Vec<(UserId, ArticleId)>,
}

type SharedTables = Arc<RwLock<Tables>>;

/// Shared in-memory storage for all forum repositories
#[derive(Default, Clone)]
pub struct InMemoryForum {
    tables: SharedTables,
}

impl InMemoryForum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.tables.write().unwrap().users.insert(user.id, user);
        self
    }

    /// Pre-populate with an article for testing
    pub fn with_article(self, article: Article) -> Self {
        self.tables
            .write()
            .unwrap()
            .articles
            .insert(article.id, article);
        self
    }

    /// Pre-populate with a comment for testing (article counters untouched)
    pub fn with_comment(self, comment: Comment) -> Self {
        self.tables
            .write()
            .unwrap()
            .comments
            .insert(comment.id, comment);
        self
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn articles(&self) -> InMemoryArticleRepository {
        InMemoryArticleRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn likes(&self) -> InMemoryArticleLikeRepository {
        InMemoryArticleLikeRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn comments(&self) -> InMemoryCommentRepository {
        InMemoryCommentRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn article(&self, id: ArticleId) -> Option<Article> {
        self.tables.read().unwrap().articles.get(&id).cloned()
    }

    pub fn comment(&self, id: CommentId) -> Option<Comment> {
        self.tables.read().unwrap().comments.get(&id).cloned()
    }

    pub fn comment_count(&self) -> usize {
        self.tables.read().unwrap().comments.len()
    }

    pub fn like_count(&self) -> usize {
        self.tables.read().unwrap().likes.len()
    }
}

fn sort_articles(articles: &mut [Article], sort: ArticleSort) {
    let latest = |a: &Article, b: &Article| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    };
    match sort {
        ArticleSort::Latest => articles.sort_by(latest),
        ArticleSort::Oldest => articles.sort_by(|a, b| latest(b, a)),
        ArticleSort::Views => {
            articles.sort_by(|a, b| b.view_count.cmp(&a.view_count).then_with(|| latest(a, b)))
        }
        ArticleSort::Likes => {
            articles.sort_by(|a, b| b.like_count.cmp(&a.like_count).then_with(|| latest(a, b)))
        }
        ArticleSort::Comments => articles.sort_by(|a, b| {
            b.comment_count
                .cmp(&a.comment_count)
                .then_with(|| latest(a, b))
        }),
    }
}

/// Whether a visible article satisfies the filters. `author` is the nickname
/// of the article's author, used by `SearchType::User`. Keywords match
/// literally, the same as the escaped `LIKE` in the PostgreSQL adapter.
fn search_matches(search: &ArticleSearch, article: &Article, author: &str) -> bool {
    if article.status != Status::Visible {
        return false;
    }
    if let Some(position) = search.position {
        if article.category != position {
            return false;
        }
    }
    if let Some(doc) = &search.document_name {
        let same_doc = article
            .document_name
            .as_deref()
            .is_some_and(|d| d.to_lowercase() == doc.to_lowercase());
        if !same_doc {
            return false;
        }
    }
    match &search.keyword {
        None => true,
        Some(kw) => match search.search_type {
            SearchType::Title => article.title.contains(kw.as_str()),
            SearchType::Content => article.content.contains(kw.as_str()),
            SearchType::User => author.contains(kw.as_str()),
            SearchType::TitleOrContent => {
                article.title.contains(kw.as_str()) || article.content.contains(kw.as_str())
            }
        },
    }
}

fn paginate(articles: Vec<Article>, page: PageRequest) -> (Vec<Article>, u64) {
    let total = articles.len() as u64;
    let content = articles
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.size as usize)
        .collect();
    (content, total)
}

fn missing_article(id: &ArticleId) -> DomainError {
    DomainError::NotFound(format!("Article {} not found", id))
}

fn missing_comment(id: &CommentId) -> DomainError {
    DomainError::NotFound(format!("Comment {} not found", id))
}

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    tables: SharedTables,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.tables.read().unwrap().users.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        let tables = self.tables.read().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id).cloned())
            .collect())
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .users
            .values()
            .find(|u| u.api_key_hash == hash)
            .cloned())
    }
}

// ============================================================================
// In-Memory Article Repository
// ============================================================================

#[derive(Default, Clone)]
pub struct InMemoryArticleRepository {
    tables: SharedTables,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn adjust(
        &self,
        id: &ArticleId,
        apply: impl FnOnce(&mut Article),
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().unwrap();
        let article = tables
            .articles
            .get_mut(id)
            .ok_or_else(|| missing_article(id))?;
        apply(article);
        Ok(())
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, DomainError> {
        Ok(self.tables.read().unwrap().articles.get(id).cloned())
    }

    async fn create(
        &self,
        user_id: &UserId,
        draft: &ArticleDraft,
    ) -> Result<Article, DomainError> {
        let mut tables = self.tables.write().unwrap();
        let next_id = tables.articles.keys().next_back().map_or(1, |id| id.0 + 1);
        let now = Utc::now();

        let article = Article {
            id: ArticleId(next_id),
            user_id: *user_id,
            title: draft.title.clone(),
            category: draft.category,
            document_name: draft.document_name.clone(),
            content: draft.content.clone(),
            status: Status::Visible,
            view_count: 0,
            like_count: 0,
            comment_count: 0,
            created_at: now,
            updated_at: now,
        };
        tables.articles.insert(article.id, article.clone());

        Ok(article)
    }

    async fn update(&self, id: &ArticleId, draft: &ArticleDraft) -> Result<(), DomainError> {
        self.adjust(id, |article| {
            article.title = draft.title.clone();
            article.category = draft.category;
            article.document_name = draft.document_name.clone();
            article.content = draft.content.clone();
            article.updated_at = Utc::now();
        })
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), DomainError> {
        self.tables
            .write()
            .unwrap()
            .articles
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| missing_article(id))
    }

    async fn search(
        &self,
        search: &ArticleSearch,
        page: PageRequest,
    ) -> Result<(Vec<Article>, u64), DomainError> {
        let tables = self.tables.read().unwrap();
        let mut matched: Vec<Article> = tables
            .articles
            .values()
            .filter(|article| {
                let author = tables
                    .users
                    .get(&article.user_id)
                    .map(|u| u.nickname.as_str())
                    .unwrap_or("");
                search_matches(search, article, author)
            })
            .cloned()
            .collect();

        sort_articles(&mut matched, search.sort);
        Ok(paginate(matched, page))
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
        include_hidden: bool,
        page: PageRequest,
    ) -> Result<(Vec<Article>, u64), DomainError> {
        let tables = self.tables.read().unwrap();
        let mut owned: Vec<Article> = tables
            .articles
            .values()
            .filter(|a| a.user_id == *user_id)
            .filter(|a| include_hidden || a.status == Status::Visible)
            .cloned()
            .collect();

        sort_articles(&mut owned, ArticleSort::Latest);
        Ok(paginate(owned, page))
    }

    async fn find_liked_by_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<(Vec<Article>, u64), DomainError> {
        let tables = self.tables.read().unwrap();
        let liked: Vec<Article> = tables
            .likes
            .iter()
            .rev()
            .filter(|(liker, _)| liker == user_id)
            .filter_map(|(_, article_id)| tables.articles.get(article_id))
            .filter(|a| a.status == Status::Visible)
            .cloned()
            .collect();

        Ok(paginate(liked, page))
    }

    async fn increment_view_count(&self, id: &ArticleId) -> Result<i64, DomainError> {
        let mut views = 0;
        self.adjust(id, |article| {
            article.view_count += 1;
            views = article.view_count;
        })?;
        Ok(views)
    }

    async fn adjust_like_count(&self, id: &ArticleId, delta: i64) -> Result<(), DomainError> {
        self.adjust(id, |article| article.like_count += delta)
    }

    async fn adjust_comment_count(&self, id: &ArticleId, delta: i64) -> Result<(), DomainError> {
        self.adjust(id, |article| article.comment_count += delta)
    }

    async fn update_status(&self, id: &ArticleId, status: Status) -> Result<(), DomainError> {
        self.adjust(id, |article| article.status = status)
    }
}

// ============================================================================
// In-Memory Article Like Repository
// ============================================================================

#[derive(Default, Clone)]
pub struct InMemoryArticleLikeRepository {
    tables: SharedTables,
}

impl InMemoryArticleLikeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleLikeRepository for InMemoryArticleLikeRepository {
    async fn exists(&self, user_id: &UserId, article_id: &ArticleId) -> Result<bool, DomainError> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .likes
            .iter()
            .any(|(u, a)| u == user_id && a == article_id))
    }

    async fn find_liked_among(
        &self,
        user_id: &UserId,
        article_ids: &[ArticleId],
    ) -> Result<Vec<ArticleId>, DomainError> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .likes
            .iter()
            .filter(|(u, a)| u == user_id && article_ids.contains(a))
            .map(|(_, a)| *a)
            .collect())
    }

    async fn add(&self, user_id: &UserId, article_id: &ArticleId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().unwrap();
        if tables
            .likes
            .iter()
            .any(|(u, a)| u == user_id && a == article_id)
        {
            return Err(DomainError::Conflict(format!(
                "User {} already likes article {}",
                user_id, article_id
            )));
        }
        tables.likes.push((*user_id, *article_id));
        Ok(())
    }

    async fn remove(&self, user_id: &UserId, article_id: &ArticleId) -> Result<(), DomainError> {
        self.tables
            .write()
            .unwrap()
            .likes
            .retain(|(u, a)| !(u == user_id && a == article_id));
        Ok(())
    }

    async fn delete_by_article(&self, article_id: &ArticleId) -> Result<(), DomainError> {
        self.tables
            .write()
            .unwrap()
            .likes
            .retain(|(_, a)| a != article_id);
        Ok(())
    }
}

// ============================================================================
// In-Memory Comment Repository
// ============================================================================

#[derive(Default, Clone)]
pub struct InMemoryCommentRepository {
    tables: SharedTables,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn adjust(
        &self,
        id: &CommentId,
        apply: impl FnOnce(&mut Comment),
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().unwrap();
        let comment = tables
            .comments
            .get_mut(id)
            .ok_or_else(|| missing_comment(id))?;
        apply(comment);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, DomainError> {
        Ok(self.tables.read().unwrap().comments.get(id).cloned())
    }

    async fn find_by_article(&self, article_id: &ArticleId) -> Result<Vec<Comment>, DomainError> {
        let tables = self.tables.read().unwrap();
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.article_id == *article_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Comment>, DomainError> {
        let tables = self.tables.read().unwrap();
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.user_id == *user_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(comments)
    }

    async fn create(&self, new_comment: &NewComment) -> Result<Comment, DomainError> {
        let mut tables = self.tables.write().unwrap();
        let next_id = tables.comments.keys().next_back().map_or(1, |id| id.0 + 1);
        let now = Utc::now();

        let comment = Comment {
            id: CommentId(next_id),
            article_id: new_comment.article_id,
            parent_id: new_comment.parent_id,
            user_id: new_comment.user_id,
            content: new_comment.content.clone(),
            status: Status::Visible,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.comments.insert(comment.id, comment.clone());

        Ok(comment)
    }

    async fn update_content(&self, id: &CommentId, content: &str) -> Result<(), DomainError> {
        self.adjust(id, |comment| {
            comment.content = content.to_string();
            comment.updated_at = Utc::now();
        })
    }

    async fn soft_delete(&self, id: &CommentId) -> Result<(), DomainError> {
        self.adjust(id, |comment| comment.deleted_at = Some(Utc::now()))
    }

    async fn update_status(&self, id: &CommentId, status: Status) -> Result<(), DomainError> {
        self.adjust(id, |comment| comment.status = status)
    }

    async fn delete_by_article(&self, article_id: &ArticleId) -> Result<(), DomainError> {
        self.tables
            .write()
            .unwrap()
            .comments
            .retain(|_, c| c.article_id != *article_id);
        Ok(())
    }
}

// ============================================================================
// Recording service fakes (HTTP tests)
// ============================================================================

/// A service call as seen by the fake, with the caller reduced to its id
#[derive(Debug, Clone, PartialEq)]
pub enum ForumCall {
    CreateArticle {
        user: UserId,
        draft: ArticleDraft,
    },
    UpdateArticle {
        user: UserId,
        article_id: ArticleId,
        draft: ArticleDraft,
    },
    GetArticles {
        viewer: Option<UserId>,
        query: ArticleQuery,
        page: PageRequest,
    },
    GetArticlesByUser {
        viewer: Option<UserId>,
        user_id: UserId,
        page: PageRequest,
    },
    GetLikedArticles {
        user: UserId,
        page: PageRequest,
    },
    GetArticleDetail {
        viewer: Option<UserId>,
        article_id: ArticleId,
    },
    DeleteArticle {
        user: UserId,
        article_id: ArticleId,
    },
    LikeArticle {
        user: UserId,
        article_id: ArticleId,
    },
    ModifyArticleStatus {
        user: UserId,
        article_id: ArticleId,
        status: Status,
    },
    GetComments {
        article_id: ArticleId,
    },
    GetCommentsByUser {
        user_id: UserId,
    },
    CreateComment {
        user: UserId,
        article_id: ArticleId,
        draft: CommentDraft,
    },
    CreateReply {
        user: UserId,
        article_id: ArticleId,
        parent_id: CommentId,
        draft: CommentDraft,
    },
    UpdateComment {
        user: UserId,
        article_id: ArticleId,
        comment_id: CommentId,
        draft: CommentDraft,
    },
    DeleteComment {
        user: UserId,
        article_id: ArticleId,
        comment_id: CommentId,
    },
    ModifyCommentStatus {
        user: UserId,
        comment_id: CommentId,
        status: Status,
    },
    UploadFile {
        file_name: String,
        content_type: String,
        size: usize,
        directory: String,
    },
}

/// Implements every service port, records the calls and returns canned data
#[derive(Default, Clone)]
pub struct RecordingForum {
    calls: Arc<Mutex<Vec<ForumCall>>>,
}

impl RecordingForum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ForumCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ForumCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn article_info(article_id: ArticleId, user_id: UserId) -> ArticleInfo {
        ArticleInfo::new(test_article(article_id.0, user_id), None, false)
    }

    fn comment_info(
        comment_id: CommentId,
        article_id: ArticleId,
        parent_id: Option<CommentId>,
        user_id: UserId,
        content: String,
    ) -> CommentInfo {
        let mut comment = test_comment(comment_id.0, article_id, user_id);
        comment.parent_id = parent_id;
        comment.content = content;
        CommentInfo::new(comment, None)
    }

    fn one_page(page: PageRequest) -> Page<ArticleInfo> {
        Page::new(
            vec![Self::article_info(ArticleId(1), UserId(1))],
            page,
            1,
        )
    }
}

#[async_trait]
impl ArticleService for RecordingForum {
    async fn create_article(
        &self,
        user: &User,
        draft: ArticleDraft,
    ) -> Result<ArticleInfo, AppError> {
        self.record(ForumCall::CreateArticle {
            user: user.id,
            draft: draft.clone(),
        });
        let mut info = Self::article_info(ArticleId(1), user.id);
        info.title = draft.title;
        Ok(info)
    }

    async fn update_article(
        &self,
        user: &User,
        article_id: ArticleId,
        draft: ArticleDraft,
    ) -> Result<(), AppError> {
        self.record(ForumCall::UpdateArticle {
            user: user.id,
            article_id,
            draft,
        });
        Ok(())
    }

    async fn get_articles(
        &self,
        viewer: Option<&User>,
        query: ArticleQuery,
        page: PageRequest,
    ) -> Result<Page<ArticleInfo>, AppError> {
        self.record(ForumCall::GetArticles {
            viewer: viewer.map(|u| u.id),
            query,
            page,
        });
        Ok(Self::one_page(page))
    }

    async fn get_articles_by_user(
        &self,
        viewer: Option<&User>,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Page<ArticleInfo>, AppError> {
        self.record(ForumCall::GetArticlesByUser {
            viewer: viewer.map(|u| u.id),
            user_id,
            page,
        });
        Ok(Self::one_page(page))
    }

    async fn get_articles_liked_by_user(
        &self,
        user: &User,
        page: PageRequest,
    ) -> Result<Page<ArticleInfo>, AppError> {
        self.record(ForumCall::GetLikedArticles {
            user: user.id,
            page,
        });
        Ok(Self::one_page(page))
    }

    async fn get_article_detail(
        &self,
        viewer: Option<&User>,
        article_id: ArticleId,
    ) -> Result<ArticleInfo, AppError> {
        self.record(ForumCall::GetArticleDetail {
            viewer: viewer.map(|u| u.id),
            article_id,
        });
        Ok(Self::article_info(article_id, UserId(1)))
    }

    async fn delete_article(&self, user: &User, article_id: ArticleId) -> Result<(), AppError> {
        self.record(ForumCall::DeleteArticle {
            user: user.id,
            article_id,
        });
        Ok(())
    }

    async fn like_article(&self, user: &User, article_id: ArticleId) -> Result<(), AppError> {
        self.record(ForumCall::LikeArticle {
            user: user.id,
            article_id,
        });
        Ok(())
    }

    async fn modify_article_status(
        &self,
        user: &User,
        article_id: ArticleId,
        status: Status,
    ) -> Result<(), AppError> {
        self.record(ForumCall::ModifyArticleStatus {
            user: user.id,
            article_id,
            status,
        });
        Ok(())
    }
}

#[async_trait]
impl CommentService for RecordingForum {
    async fn get_comments_by_article(
        &self,
        article_id: ArticleId,
    ) -> Result<Vec<CommentInfo>, AppError> {
        self.record(ForumCall::GetComments { article_id });
        Ok(vec![Self::comment_info(
            CommentId(1),
            article_id,
            None,
            UserId(1),
            "first".to_string(),
        )])
    }

    async fn get_comments_by_user(&self, user_id: UserId) -> Result<Vec<CommentInfo>, AppError> {
        self.record(ForumCall::GetCommentsByUser { user_id });
        Ok(Vec::new())
    }

    async fn create_comment(
        &self,
        user: &User,
        article_id: ArticleId,
        draft: CommentDraft,
    ) -> Result<CommentInfo, AppError> {
        self.record(ForumCall::CreateComment {
            user: user.id,
            article_id,
            draft: draft.clone(),
        });
        Ok(Self::comment_info(
            CommentId(1),
            article_id,
            None,
            user.id,
            draft.content,
        ))
    }

    async fn create_reply(
        &self,
        user: &User,
        article_id: ArticleId,
        parent_id: CommentId,
        draft: CommentDraft,
    ) -> Result<CommentInfo, AppError> {
        self.record(ForumCall::CreateReply {
            user: user.id,
            article_id,
            parent_id,
            draft: draft.clone(),
        });
        Ok(Self::comment_info(
            CommentId(2),
            article_id,
            Some(parent_id),
            user.id,
            draft.content,
        ))
    }

    async fn update_comment(
        &self,
        user: &User,
        article_id: ArticleId,
        comment_id: CommentId,
        draft: CommentDraft,
    ) -> Result<(), AppError> {
        self.record(ForumCall::UpdateComment {
            user: user.id,
            article_id,
            comment_id,
            draft,
        });
        Ok(())
    }

    async fn delete_comment(
        &self,
        user: &User,
        article_id: ArticleId,
        comment_id: CommentId,
    ) -> Result<(), AppError> {
        self.record(ForumCall::DeleteComment {
            user: user.id,
            article_id,
            comment_id,
        });
        Ok(())
    }

    async fn modify_comment_status(
        &self,
        user: &User,
        comment_id: CommentId,
        status: Status,
    ) -> Result<(), AppError> {
        self.record(ForumCall::ModifyCommentStatus {
            user: user.id,
            comment_id,
            status,
        });
        Ok(())
    }
}

#[async_trait]
impl FileUploadService for RecordingForum {
    async fn upload_file(&self, file: UploadedFile, directory: &str) -> Result<String, AppError> {
        let url = format!("https://cdn.test/{}/{}", directory, file.file_name);
        self.record(ForumCall::UploadFile {
            file_name: file.file_name,
            content_type: file.content_type,
            size: file.bytes.len(),
            directory: directory.to_string(),
        });
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_matches_keyword_by_type() {
        let mut article = test_article(1, UserId(1));
        article.title = "Understanding hooks".to_string();
        article.content = "useEffect runs after render".to_string();

        let by_title = ArticleSearch {
            keyword: Some("hooks".to_string()),
            search_type: SearchType::Title,
            ..Default::default()
        };
        assert!(search_matches(&by_title, &article, "kim"));

        let by_content = ArticleSearch {
            keyword: Some("hooks".to_string()),
            search_type: SearchType::Content,
            ..Default::default()
        };
        assert!(!search_matches(&by_content, &article, "kim"));

        let by_user = ArticleSearch {
            keyword: Some("ki".to_string()),
            search_type: SearchType::User,
            ..Default::default()
        };
        assert!(search_matches(&by_user, &article, "kim"));
    }

    #[test]
    fn search_filters_document_name_case_insensitively() {
        let mut article = test_article(1, UserId(1));
        article.document_name = Some("React".to_string());

        let search = ArticleSearch {
            document_name: Some("react".to_string()),
            ..Default::default()
        };
        assert!(search_matches(&search, &article, "kim"));

        article.document_name = None;
        assert!(!search_matches(&search, &article, "kim"));
    }

    #[test]
    fn wildcard_characters_match_literally() {
        let mut article = test_article(1, UserId(1));
        article.title = "abc".to_string();

        let search = |kw: &str| ArticleSearch {
            keyword: Some(kw.to_string()),
            search_type: SearchType::Title,
            ..Default::default()
        };
        assert!(!search_matches(&search("%"), &article, "kim"));
        assert!(!search_matches(&search("a_c"), &article, "kim"));

        article.title = "100% a_c".to_string();
        assert!(search_matches(&search("%"), &article, "kim"));
        assert!(search_matches(&search("a_c"), &article, "kim"));
    }
}
