//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use std::sync::Arc;

use crate::application::{GetContentUseCase, ListContentUseCase, VocabularyUseCase};
use crate::domain::query::{ContentQuery, ContentType, RawContentFilter};
use crate::domain::repository::ContentRepository;
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    ChapterDto, ContentDetailResponse, ContentDto, ContentFilterRequest, ContentListResponse,
    GenreDto, NovelListResponse, NovelsResponse, TagDto,
};
use kernel::id::ContentId;

/// Shared state for catalog handlers
pub struct CatalogAppState<R>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> Clone for CatalogAppState<R>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

// ============================================================================
// Listings
// ============================================================================

/// POST /api/content
pub async fn list_content<R>(
    State(state): State<CatalogAppState<R>>,
    Json(req): Json<ContentFilterRequest>,
) -> CatalogResult<Json<ContentListResponse>>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    let query = ContentQuery::from_raw(req.into_raw())?;
    let page = ListContentUseCase::new(state.repo.clone())
        .execute(query)
        .await?;

    Ok(Json(ContentListResponse {
        content: page.items.into_iter().map(ContentDto::from).collect(),
        pagination: page.pagination,
    }))
}

/// POST /api/novels
///
/// Same filter payload as /api/content with the type pinned to NOVEL.
pub async fn list_novels<R>(
    State(state): State<CatalogAppState<R>>,
    Json(req): Json<ContentFilterRequest>,
) -> CatalogResult<Json<NovelListResponse>>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    let query = ContentQuery::from_raw(req.into_raw())?.pin_type(ContentType::Novel);
    let page = ListContentUseCase::new(state.repo.clone())
        .execute(query)
        .await?;

    Ok(Json(NovelListResponse {
        novels: page.items.into_iter().map(ContentDto::from).collect(),
        pagination: page.pagination,
    }))
}

/// GET /api/novels
pub async fn all_novels<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<NovelsResponse>>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    let query =
        ContentQuery::from_raw(RawContentFilter::default())?.pin_type(ContentType::Novel);
    let items = ListContentUseCase::new(state.repo.clone())
        .execute_all(query)
        .await?;

    Ok(Json(NovelsResponse {
        novels: items.into_iter().map(ContentDto::from).collect(),
    }))
}

// ============================================================================
// Single item
// ============================================================================

/// GET /api/content/{id}
pub async fn get_content<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<ContentDetailResponse>>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    fetch_detail(state, &id, None).await
}

/// GET /api/novels/{id}
///
/// 404 when the id exists but is not a novel.
pub async fn get_novel<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<ContentDetailResponse>>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    fetch_detail(state, &id, Some(ContentType::Novel)).await
}

async fn fetch_detail<R>(
    state: CatalogAppState<R>,
    raw_id: &str,
    required_type: Option<ContentType>,
) -> CatalogResult<Json<ContentDetailResponse>>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    let id = ContentId::parse(raw_id)
        .map_err(|_| CatalogError::Validation(format!("Invalid content id '{raw_id}'")))?;

    let detail = GetContentUseCase::new(state.repo.clone())
        .execute(&id, required_type)
        .await?;

    Ok(Json(ContentDetailResponse {
        content: ContentDto::from(detail.content),
        chapters: detail.chapters.into_iter().map(ChapterDto::from).collect(),
    }))
}

// ============================================================================
// Vocabularies
// ============================================================================

/// GET /api/available-genre
pub async fn available_genres<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<Vec<GenreDto>>>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    let genres = VocabularyUseCase::new(state.repo.clone()).genres().await?;

    Ok(Json(
        genres
            .into_iter()
            .map(|g| GenreDto {
                id: g.id.to_string(),
                name: g.name,
                description: g.description,
            })
            .collect(),
    ))
}

/// GET /api/available-tags
pub async fn available_tags<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<Vec<TagDto>>>
where
    R: ContentRepository + Clone + Send + Sync + 'static,
{
    let tags = VocabularyUseCase::new(state.repo.clone()).tags().await?;

    Ok(Json(
        tags.into_iter()
            .map(|t| TagDto {
                id: t.id.to_string(),
                name: t.name,
            })
            .collect(),
    ))
}
