//! Blog Entities

use chrono::{DateTime, Utc};

use kernel::id::{BlogCategoryId, BlogPostId, BlogTagId, UserId};

/// Author as attached to posts
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: UserId,
    pub username: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogCategory {
    pub id: BlogCategoryId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogTag {
    pub id: BlogTagId,
    pub name: String,
    pub slug: String,
}

/// Optional one-to-one SEO metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Seo {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub keywords: Option<String>,
}

/// A blog post hydrated with relations and counts
#[derive(Debug, Clone)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub author: Author,
    pub categories: Vec<BlogCategory>,
    pub tags: Vec<BlogTag>,
    pub comment_count: i64,
    pub like_count: i64,
    pub seo: Option<Seo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a post; categories/tags are connect-or-create by name
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub author_id: UserId,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub seo: Option<Seo>,
}

/// Partial update; absent fields keep their stored value
///
/// When `categories`/`tags` are present the join sets are fully
/// replaced, atomically with the rest of the update.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub seo: Option<Seo>,
}
