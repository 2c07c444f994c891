//! Docshund Forum API Server
//!
//! Articles, comments, likes and moderation for the Docshund documentation
//! community. Uses hexagonal (ports & adapters) architecture for clean
//! separation of concerns.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;



use adapters::{
    create_missing_tables, LocalFileUploadService, PostgresArticleLikeRepository,
    PostgresArticleRepository, PostgresCommentRepository, PostgresUserRepository,
};
use app::{ArticleServiceImpl, CommentServiceImpl};
use config::Config;
use domain::ports::{ArticleService, CommentService, FileUploadService, UserRepository};

/// Base path of every forum endpoint
pub const FORUM_BASE_PATH: &str = "/api/v1/docshund/forums";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub article_service: Arc<dyn ArticleService>,
    pub comment_service: Arc<dyn CommentService>,
    pub upload_service: Arc<dyn FileUploadService>,
    /// Used by the auth middleware to resolve API keys
    pub users: Arc<dyn UserRepository>,
}

/// Per-peer rate limit for the image upload route
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst: u32,
}

/// Router settings that vary between production and tests
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Requires the router to be served with `ConnectInfo<SocketAddr>`
    pub upload_rate_limit: Option<RateLimit>,
    pub max_upload_bytes: usize,
    /// Serve stored uploads under `/uploads`
    pub serve_uploads_from: Option<PathBuf>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the full application router
pub fn build_router(state: AppState, config: RouterConfig) -> anyhow::Result<Router> {
    // Multipart framing needs some room beyond the file itself
    let mut image_routes = Router::new()
        .route("/image", post(handlers::upload_image))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes + 64 * 1024));

    if let Some(limit) = config.upload_rate_limit {
        // PeerIpKeyExtractor reads the client IP from the socket connection
        let governor_config = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(PeerIpKeyExtractor)
                .per_second(limit.per_second)
                .burst_size(limit.burst)
                .finish()
                .context("Failed to build governor config")?,
        );
        image_routes = image_routes.layer(GovernorLayer {
            config: governor_config,
        });
    }

    // Public endpoints (optional auth)
    let public_routes = Router::new()
        .route("/", get(handlers::get_articles))
        .route("/user/:user_id", get(handlers::get_articles_by_user))
        .route("/:article_id", get(handlers::get_article))
        .route("/:article_id/comments", get(handlers::get_comments_by_article))
        .route("/comments/user/:user_id", get(handlers::get_comments_by_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::optional_auth_middleware,
        ));

    // Protected endpoints
    let protected_routes = Router::new()
        .route("/", post(handlers::create_article))
        .route("/likes", get(handlers::get_liked_articles))
        .route(
            "/:article_id",
            patch(handlers::update_article).delete(handlers::delete_article),
        )
        .route("/:article_id/likes", post(handlers::like_article))
        .route("/:article_id/comments", post(handlers::create_comment))
        .route(
            "/:article_id/comments/:comment_id",
            post(handlers::create_reply)
                .patch(handlers::update_comment)
                .delete(handlers::delete_comment),
        )
        .route(
            "/article/:article_id/status",
            patch(handlers::modify_article_status),
        )
        .route(
            "/comment/:comment_id/status",
            patch(handlers::modify_comment_status),
        )
        .merge(image_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let mut app = Router::new()
        .route("/health", get(health))
        .nest(FORUM_BASE_PATH, public_routes.merge(protected_routes));

    if let Some(dir) = config.serve_uploads_from {
        app = app.nest_service("/uploads", ServeDir::new(dir));
    }

    Ok(app
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,docshund_forum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Docshund Forum API...");

    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    if config.auto_create_schema {
        create_missing_tables(&db)
            .await
            .context("Failed to create tables")?;
    }

    // Create adapters
    let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));
    let article_repo = Arc::new(PostgresArticleRepository::new(db.clone()));
    let like_repo = Arc::new(PostgresArticleLikeRepository::new(db.clone()));
    let comment_repo = Arc::new(PostgresCommentRepository::new(db.clone()));

    let upload_service = Arc::new(LocalFileUploadService::new(
        config.upload_dir.clone(),
        &config.upload_public_url,
        config.max_upload_bytes,
    ));
    tracing::info!(dir = %upload_service.root().display(), "Storing uploads on local disk");

    // Create application services
    let article_service = Arc::new(ArticleServiceImpl::new(
        article_repo.clone(),
        like_repo,
        comment_repo.clone(),
        user_repo.clone(),
    ));
    let comment_service = Arc::new(CommentServiceImpl::new(
        comment_repo,
        article_repo,
        user_repo.clone(),
    ));

    let state = AppState {
        article_service,
        comment_service,
        upload_service,
        users: user_repo,
    };

    let app = build_router(
        state,
        RouterConfig {
            upload_rate_limit: Some(RateLimit {
                per_second: config.upload_rate_per_second,
                burst: config.upload_rate_burst,
            }),
            max_upload_bytes: config.max_upload_bytes,
            serve_uploads_from: Some(config.upload_dir.clone()),
        },
    )?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
