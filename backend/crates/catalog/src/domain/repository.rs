//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{Content, ContentDetail, Genre, Tag};
use crate::domain::query::{ContentQuery, FilterClause};
use crate::error::CatalogResult;
use kernel::id::ContentId;

/// Content repository trait
///
/// `count` and `list` must apply the same predicate so pagination totals
/// never drift from page contents.
#[trait_variant::make(ContentRepository: Send)]
pub trait LocalContentRepository {
    /// Count rows matching the predicate, without the pagination slice
    async fn count(&self, filters: &[FilterClause]) -> CatalogResult<i64>;

    /// Fetch one hydrated page of results
    async fn list(&self, query: &ContentQuery) -> CatalogResult<Vec<Content>>;

    /// Fetch every matching row, ignoring pagination (the full-list route)
    async fn list_all(&self, query: &ContentQuery) -> CatalogResult<Vec<Content>>;

    /// Fetch a single item with chapters, or None
    async fn find_by_id(&self, id: &ContentId) -> CatalogResult<Option<ContentDetail>>;

    /// Full genre vocabulary ordered by name
    async fn list_genres(&self) -> CatalogResult<Vec<Genre>>;

    /// Full tag vocabulary ordered by name
    async fn list_tags(&self) -> CatalogResult<Vec<Tag>>;
}
