//! List Posts Use Case

use std::sync::Arc;

use crate::domain::entity::BlogPost;
use crate::domain::query::BlogQuery;
use crate::domain::repository::BlogRepository;
use crate::error::BlogResult;
use kernel::page::Pagination;

/// One page of posts plus its envelope
pub struct PostPage {
    pub items: Vec<BlogPost>,
    pub pagination: Pagination,
}

/// List posts use case
pub struct ListPostsUseCase<R>
where
    R: BlogRepository,
{
    repo: Arc<R>,
}

impl<R> ListPostsUseCase<R>
where
    R: BlogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, query: BlogQuery) -> BlogResult<PostPage> {
        let total = self.repo.count(&query.filters).await?;
        let items = self.repo.list(&query).await?;

        Ok(PostPage {
            items,
            pagination: Pagination::new(total, &query.page),
        })
    }
}
