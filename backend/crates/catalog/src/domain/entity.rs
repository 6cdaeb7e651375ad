//! Catalog Entities

use chrono::{DateTime, Utc};

use crate::domain::query::{ContentStatus, ContentType};
use kernel::id::{ChapterId, ContentId, GenreId, TagId, UserId};

/// Author as attached to listing items
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: UserId,
    pub username: String,
    pub avatar_url: String,
}

/// Genre vocabulary entry
#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
    pub description: Option<String>,
}

/// Tag vocabulary entry
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// A content item hydrated with its author, genres and tags
#[derive(Debug, Clone)]
pub struct Content {
    pub id: ContentId,
    pub title: String,
    pub description: String,
    pub content_type: ContentType,
    pub status: ContentStatus,
    pub author: Author,
    pub rating: f32,
    pub views: i64,
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub genres: Vec<Genre>,
    pub tags: Vec<Tag>,
}

/// Chapter header, ordered by `chapter_number` within its content
#[derive(Debug, Clone)]
pub struct Chapter {
    pub id: ChapterId,
    pub content_id: ContentId,
    pub chapter_number: i32,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Single-item view: the content plus its ordered chapter list
#[derive(Debug, Clone)]
pub struct ContentDetail {
    pub content: Content,
    pub chapters: Vec<Chapter>,
}
