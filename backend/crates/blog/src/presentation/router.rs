//! Blog Router

use axum::{
    Router,
    routing::get,
};
use std::sync::Arc;

use auth::AuthConfig;

use crate::domain::repository::BlogRepository;
use crate::infra::postgres::PgBlogRepository;
use crate::presentation::handlers::{self, BlogAppState};

/// Create the blog router with PostgreSQL repository
pub fn blog_router(repo: PgBlogRepository, config: AuthConfig) -> Router {
    blog_router_generic(repo, config)
}

/// Create a generic blog router for any repository implementation
pub fn blog_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let state = BlogAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_posts::<R>).post(handlers::create_post::<R>),
        )
        .route("/categories", get(handlers::list_categories::<R>))
        .route(
            "/{postId}",
            get(handlers::get_post::<R>)
                .put(handlers::update_post::<R>)
                .delete(handlers::delete_post::<R>),
        )
        .with_state(state)
}
