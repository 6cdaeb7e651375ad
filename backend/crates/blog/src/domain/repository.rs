//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{BlogCategory, BlogPost, NewPost, PostUpdate};
use crate::domain::query::{BlogFilter, BlogQuery};
use crate::error::BlogResult;
use kernel::id::BlogPostId;

/// Blog repository trait
#[trait_variant::make(BlogRepository: Send)]
pub trait LocalBlogRepository {
    /// Count posts matching the predicate, without the pagination slice
    async fn count(&self, filters: &[BlogFilter]) -> BlogResult<i64>;

    /// Fetch one hydrated page of posts
    async fn list(&self, query: &BlogQuery) -> BlogResult<Vec<BlogPost>>;

    /// Fetch a single post with relations, counts and SEO, or None
    async fn find_by_id(&self, id: &BlogPostId) -> BlogResult<Option<BlogPost>>;

    /// Create a post; categories/tags connect-or-create by name, all in
    /// one transaction
    async fn create(&self, draft: &NewPost) -> BlogResult<BlogPost>;

    /// Apply a partial update; join replacement and SEO upsert happen in
    /// the same transaction as the column update
    async fn update(&self, id: &BlogPostId, changes: &PostUpdate) -> BlogResult<BlogPost>;

    /// Delete a post (join rows cascade)
    async fn delete(&self, id: &BlogPostId) -> BlogResult<()>;

    /// Full category vocabulary ordered by name
    async fn list_categories(&self) -> BlogResult<Vec<BlogCategory>>;
}
