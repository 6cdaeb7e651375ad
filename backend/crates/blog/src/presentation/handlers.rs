//! HTTP Handlers
//!
//! Mutating routes verify the session first, so a missing or invalid
//! token is a 401 before any lookup; the 404/403 ladder follows inside
//! the use cases.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use std::sync::Arc;

use auth::{AuthConfig, SessionClaims, authenticate_request};

use crate::application::{
    CreatePostUseCase, DeletePostUseCase, GetPostUseCase, ListCategoriesUseCase, ListPostsUseCase,
    UpdatePostUseCase,
};
use crate::domain::query::BlogQuery;
use crate::domain::repository::BlogRepository;
use crate::error::{BlogError, BlogResult};
use crate::presentation::dto::{
    BlogListQuery, CategoryDto, CreatePostRequest, PostDto, PostListResponse, UpdatePostRequest,
};
use kernel::id::BlogPostId;

/// Shared state for blog handlers
pub struct BlogAppState<R>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for BlogAppState<R>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

fn require_session(headers: &HeaderMap, config: &AuthConfig) -> BlogResult<SessionClaims> {
    Ok(authenticate_request(headers, config)?)
}

fn parse_post_id(raw: &str) -> BlogResult<BlogPostId> {
    BlogPostId::parse(raw)
        .map_err(|_| BlogError::Validation(format!("Invalid post id '{raw}'")))
}

// ============================================================================
// Public reads
// ============================================================================

/// GET /api/blog
pub async fn list_posts<R>(
    State(state): State<BlogAppState<R>>,
    Query(query): Query<BlogListQuery>,
) -> BlogResult<Json<PostListResponse>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let query = BlogQuery::from_raw(query.into_raw())?;
    let page = ListPostsUseCase::new(state.repo.clone())
        .execute(query)
        .await?;

    Ok(Json(PostListResponse {
        posts: page.items.into_iter().map(PostDto::from).collect(),
        pagination: page.pagination,
    }))
}

/// GET /api/blog/{postId}
pub async fn get_post<R>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
) -> BlogResult<Json<PostDto>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let id = parse_post_id(&id)?;
    let post = GetPostUseCase::new(state.repo.clone()).execute(&id).await?;

    Ok(Json(PostDto::from(post)))
}

/// GET /api/blog/categories
pub async fn list_categories<R>(
    State(state): State<BlogAppState<R>>,
) -> BlogResult<Json<Vec<CategoryDto>>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let categories = ListCategoriesUseCase::new(state.repo.clone())
        .execute()
        .await?;

    Ok(Json(
        categories.into_iter().map(CategoryDto::from).collect(),
    ))
}

// ============================================================================
// Authenticated mutations
// ============================================================================

/// POST /api/blog
pub async fn create_post<R>(
    State(state): State<BlogAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<CreatePostRequest>,
) -> BlogResult<(StatusCode, Json<PostDto>)>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let claims = require_session(&headers, &state.config)?;

    let post = CreatePostUseCase::new(state.repo.clone())
        .execute(&claims, req.into_input())
        .await?;

    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

/// PUT /api/blog/{postId}
pub async fn update_post<R>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<UpdatePostRequest>,
) -> BlogResult<Json<PostDto>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let claims = require_session(&headers, &state.config)?;
    let id = parse_post_id(&id)?;

    let post = UpdatePostUseCase::new(state.repo.clone())
        .execute(&claims, &id, req.into_input())
        .await?;

    Ok(Json(PostDto::from(post)))
}

/// DELETE /api/blog/{postId}
pub async fn delete_post<R>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> BlogResult<StatusCode>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let claims = require_session(&headers, &state.config)?;
    let id = parse_post_id(&id)?;

    DeletePostUseCase::new(state.repo.clone())
        .execute(&claims, &id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
