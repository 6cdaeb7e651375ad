//! Request / Response DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{Chapter, Content};
use crate::domain::query::RawContentFilter;
use kernel::page::Pagination;

/// Filter payload accepted by the POST listing endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentFilterRequest {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub genres: Vec<Uuid>,
    pub tags: Vec<Uuid>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ContentFilterRequest {
    pub fn into_raw(self) -> RawContentFilter {
        RawContentFilter {
            sort_by: self.sort_by,
            order: self.order,
            genres: self.genres,
            tags: self.tags,
            status: self.status,
            content_type: self.content_type,
            search: self.search,
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: String,
    pub username: String,
    pub avatar_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDto {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub status: String,
    pub rating: f32,
    pub views: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub author: AuthorDto,
    pub genres: Vec<GenreDto>,
    pub tags: Vec<TagDto>,
}

impl From<Content> for ContentDto {
    fn from(content: Content) -> Self {
        Self {
            id: content.id.to_string(),
            title: content.title,
            description: content.description,
            content_type: content.content_type.code().to_string(),
            status: content.status.code().to_string(),
            rating: content.rating,
            views: content.views,
            cover_image_url: content.cover_image_url,
            created_at: content.created_at,
            updated_at: content.updated_at,
            author: AuthorDto {
                id: content.author.id.to_string(),
                username: content.author.username,
                avatar_url: content.author.avatar_url,
            },
            genres: content
                .genres
                .into_iter()
                .map(|g| GenreDto {
                    id: g.id.to_string(),
                    name: g.name,
                    description: g.description,
                })
                .collect(),
            tags: content
                .tags
                .into_iter()
                .map(|t| TagDto {
                    id: t.id.to_string(),
                    name: t.name,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterDto {
    pub id: String,
    pub chapter_number: i32,
    pub title: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Chapter> for ChapterDto {
    fn from(chapter: Chapter) -> Self {
        Self {
            id: chapter.id.to_string(),
            chapter_number: chapter.chapter_number,
            title: chapter.title,
            created_at: chapter.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContentListResponse {
    pub content: Vec<ContentDto>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct NovelListResponse {
    pub novels: Vec<ContentDto>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct NovelsResponse {
    pub novels: Vec<ContentDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetailResponse {
    #[serde(flatten)]
    pub content: ContentDto,
    pub chapters: Vec<ChapterDto>,
}
