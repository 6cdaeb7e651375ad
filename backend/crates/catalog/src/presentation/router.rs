//! Catalog Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::repository::ContentRepository;
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the catalog router with PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository) -> Router {
    catalog_router_generic(repo)
}

/// Create a generic catalog router for any repository implementation
pub fn catalog_router_generic<R>(repo: R) -> Router
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/content", post(handlers::list_content::<R>))
        .route("/content/{id}", get(handlers::get_content::<R>))
        .route(
            "/novels",
            get(handlers::all_novels::<R>).post(handlers::list_novels::<R>),
        )
        .route("/novels/{id}", get(handlers::get_novel::<R>))
        .route("/available-genre", get(handlers::available_genres::<R>))
        .route("/available-tags", get(handlers::available_tags::<R>))
        .with_state(state)
}
