//! List Content Use Case
//!
//! Runs the count query and the page query over the same predicate and
//! assembles the pagination envelope.

use std::sync::Arc;

use crate::domain::entity::Content;
use crate::domain::query::ContentQuery;
use crate::domain::repository::ContentRepository;
use crate::error::CatalogResult;
use kernel::page::Pagination;

/// One page of results plus its envelope
pub struct ContentPage {
    pub items: Vec<Content>,
    pub pagination: Pagination,
}

/// List content use case
pub struct ListContentUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> ListContentUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Out-of-range pages return an empty item list, not an error.
    pub async fn execute(&self, query: ContentQuery) -> CatalogResult<ContentPage> {
        let total = self.repo.count(&query.filters).await?;
        let items = self.repo.list(&query).await?;

        tracing::debug!(
            total,
            returned = items.len(),
            page = query.page.page(),
            "Content listing executed"
        );

        Ok(ContentPage {
            items,
            pagination: Pagination::new(total, &query.page),
        })
    }

    /// Full matching list without a pagination slice
    pub async fn execute_all(&self, query: ContentQuery) -> CatalogResult<Vec<Content>> {
        self.repo.list_all(&query).await
    }
}
