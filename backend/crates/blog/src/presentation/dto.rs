//! Data Transfer Objects
//!
//! Request/response types with camelCase JSON field names.

use serde::{Deserialize, Serialize};

use crate::application::{CreatePostInput, UpdatePostInput};
use crate::domain::entity::{Author, BlogCategory, BlogPost, BlogTag, Seo};
use crate::domain::query::RawBlogFilter;
use kernel::page::Pagination;

// ============================================================================
// Requests
// ============================================================================

/// Listing query string
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BlogListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl BlogListQuery {
    pub fn into_raw(self) -> RawBlogFilter {
        RawBlogFilter {
            search: self.search,
            category: self.category,
            tag: self.tag,
            featured: self.featured,
            sort: self.sort,
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub seo: Option<SeoDto>,
}

impl CreatePostRequest {
    pub fn into_input(self) -> CreatePostInput {
        CreatePostInput {
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            cover_image_url: self.cover_image_url,
            published: self.published,
            featured: self.featured,
            categories: self.categories,
            tags: self.tags,
            seo: self.seo.map(SeoDto::into_seo),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub seo: Option<SeoDto>,
}

impl UpdatePostRequest {
    pub fn into_input(self) -> UpdatePostInput {
        UpdatePostInput {
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            cover_image_url: self.cover_image_url,
            published: self.published,
            featured: self.featured,
            categories: self.categories,
            tags: self.tags,
            seo: self.seo.map(SeoDto::into_seo),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoDto {
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}

impl SeoDto {
    fn into_seo(self) -> Seo {
        Seo {
            meta_title: self.meta_title,
            meta_description: self.meta_description,
            keywords: self.keywords,
        }
    }
}

impl From<Seo> for SeoDto {
    fn from(seo: Seo) -> Self {
        Self {
            meta_title: seo.meta_title,
            meta_description: seo.meta_description,
            keywords: seo.keywords,
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

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.to_string(),
            username: author.username,
            avatar_url: author.avatar_url,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl From<BlogCategory> for CategoryDto {
    fn from(category: BlogCategory) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name,
            slug: category.slug,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl From<BlogTag> for TagDto {
    fn from(tag: BlogTag) -> Self {
        Self {
            id: tag.id.to_string(),
            name: tag.name,
            slug: tag.slug,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub author: AuthorDto,
    pub categories: Vec<CategoryDto>,
    pub tags: Vec<TagDto>,
    pub comment_count: i64,
    pub like_count: i64,
    pub seo: Option<SeoDto>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<BlogPost> for PostDto {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title,
            slug: post.slug,
            content: post.content,
            excerpt: post.excerpt,
            cover_image_url: post.cover_image_url,
            published: post.published,
            featured: post.featured,
            author: AuthorDto::from(post.author),
            categories: post.categories.into_iter().map(CategoryDto::from).collect(),
            tags: post.tags.into_iter().map(TagDto::from).collect(),
            comment_count: post.comment_count,
            like_count: post.like_count,
            seo: post.seo.map(SeoDto::from),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostDto>,
    pub pagination: Pagination,
}
